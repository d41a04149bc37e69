use std::env;
use std::path::PathBuf;
use std::process::Command;
use std::str;

use tracing::{debug, trace};

use super::config::*;

/// Maps a Go import path to the directory holding its sources.
pub trait PackageLocator: Send + Sync {
    fn locate(&self, import_path: &str) -> Option<PathBuf>;
}

/// Looks a package up under `$GOROOT/src` and every `$GOPATH/src` entry, then
/// falls back to asking the go tool (module mode).
#[derive(Debug, Clone, Default)]
pub struct GoLocator {
    goroot: Option<PathBuf>,
    gopath: Vec<PathBuf>,
    go_list: bool,
    working_dir: PathBuf,
}

impl GoLocator {
    pub fn new(
        goroot: Option<PathBuf>,
        gopath: Vec<PathBuf>,
        go_list: bool,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            goroot,
            gopath,
            go_list,
            working_dir: working_dir.into(),
        }
    }

    pub fn from_env(working_dir: impl Into<PathBuf>) -> Self {
        Self::new(goroot_from_env(), gopath_from_env(), true, working_dir)
    }

    fn search_roots(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.goroot
            .iter()
            .chain(self.gopath.iter())
            .map(|root| root.join(SRC_DIR))
    }

    fn locate_with_go_list(&self, import_path: &str) -> Option<PathBuf> {
        let output = Command::new(GO_COMMAND)
            .args(GO_LIST_DIR_ARGS)
            .args([GO_LIST_DIR_TEMPLATE, import_path])
            .current_dir(&self.working_dir)
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                debug!(import_path, error = %e, "failed to run go list");
                return None;
            }
        };

        if !output.status.success() {
            trace!(
                import_path,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "go list could not find package"
            );
            return None;
        }

        let dir = str::from_utf8(&output.stdout).ok()?.trim();
        if dir.is_empty() {
            return None;
        }

        let dir = PathBuf::from(dir);
        dir.is_dir().then_some(dir)
    }
}

impl PackageLocator for GoLocator {
    fn locate(&self, import_path: &str) -> Option<PathBuf> {
        for root in self.search_roots() {
            let candidate = root.join(import_path);
            trace!(candidate = %candidate.display(), "checking package directory");
            if candidate.is_dir() {
                return Some(candidate);
            }
        }

        if self.go_list {
            return self.locate_with_go_list(import_path);
        }

        None
    }
}

pub fn goroot_from_env() -> Option<PathBuf> {
    env::var_os(GOROOT_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn gopath_from_env() -> Vec<PathBuf> {
    match env::var_os(GOPATH_ENV).filter(|v| !v.is_empty()) {
        Some(value) => env::split_paths(&value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => default_gopath().into_iter().collect(),
    }
}

/// `$HOME/go`, the go tool's default when GOPATH is unset.
fn default_gopath() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_GOPATH_DIR))
}
