use std::path::{Path, PathBuf};

use tracing::debug;

use super::locator::{GoLocator, PackageLocator};
use super::specifier::{absolutize, Specifier, Target};
use super::walker::walk_dirs;
use super::DirectorySet;
use crate::config::Config;
use crate::error::{ResolveError, Result};

/// Turns command-line specifiers into the set of directories to scan.
pub struct Resolver {
    working_dir: PathBuf,
    locator: Box<dyn PackageLocator>,
    excluded_dirs: Vec<String>,
}

impl Resolver {
    pub fn new(working_dir: impl Into<PathBuf>, locator: Box<dyn PackageLocator>) -> Self {
        Self {
            working_dir: working_dir.into(),
            locator,
            excluded_dirs: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let locator = GoLocator::new(
            config.goroot.clone(),
            config.gopath.clone(),
            config.go_list,
            &config.working_dir,
        );
        Self::new(&config.working_dir, Box::new(locator))
            .with_excluded_dirs(config.exclude_dirs.clone())
    }

    pub fn with_excluded_dirs(mut self, excluded_dirs: Vec<String>) -> Self {
        self.excluded_dirs = excluded_dirs;
        self
    }

    pub fn resolve_all<S: AsRef<str>>(&self, specifiers: &[S]) -> Result<DirectorySet> {
        let mut dirs = DirectorySet::new();
        for raw in specifiers {
            let Some(specifier) = Specifier::parse(raw.as_ref()) else {
                debug!(arg = raw.as_ref(), "ignoring flag-like argument");
                continue;
            };
            dirs.extend(self.resolve(&specifier)?);
        }
        debug!(count = dirs.len(), "resolved directories");
        Ok(dirs)
    }

    /// Recursive specifiers also yield every directory below the resolved one.
    pub fn resolve(&self, specifier: &Specifier) -> Result<Vec<PathBuf>> {
        let dir = match &specifier.target {
            Target::Path(path) => self.resolve_path(path)?,
            Target::Package(import_path) => self.resolve_package(import_path, &specifier.raw)?,
        };
        debug!(specifier = %specifier.raw, dir = %dir.display(), "resolved specifier");

        if !specifier.recursive {
            return Ok(vec![dir]);
        }

        Ok(walk_dirs(&dir, &self.excluded_dirs)?)
    }

    fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        let dir = absolutize(&self.working_dir, path);
        if !dir.exists() {
            return Err(ResolveError::path_not_found(dir).into());
        }
        if !dir.is_dir() {
            return Err(ResolveError::not_a_directory(dir).into());
        }
        Ok(dir)
    }

    fn resolve_package(&self, import_path: &str, raw: &str) -> Result<PathBuf> {
        if import_path.is_empty() {
            return Err(ResolveError::empty_import_path(raw).into());
        }
        self.locator
            .locate(import_path)
            .ok_or_else(|| ResolveError::package_not_found(import_path).into())
    }
}
