//! Specifier resolution: turns command-line package arguments into the set
//! of absolute directories whose test files get scanned.

pub mod config;
pub mod locator;
pub mod resolver;
pub mod specifier;
pub mod walker;

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub use locator::{GoLocator, PackageLocator};
pub use resolver::Resolver;
pub use specifier::{Specifier, Target};
pub use walker::walk_dirs;

/// Absolute directory paths, each present once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet {
    dirs: BTreeSet<PathBuf>,
}

impl DirectorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the directory was already present.
    pub fn insert(&mut self, dir: PathBuf) -> bool {
        self.dirs.insert(dir)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }
}

impl Extend<PathBuf> for DirectorySet {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        self.dirs.extend(iter);
    }
}

impl FromIterator<PathBuf> for DirectorySet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            dirs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DirectorySet {
    type Item = PathBuf;
    type IntoIter = btree_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.into_iter()
    }
}

impl<'a> IntoIterator for &'a DirectorySet {
    type Item = &'a PathBuf;
    type IntoIter = btree_set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}
