use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use super::config::VCS_DIR_PREFIX;
use crate::error::WalkError;

/// Collects `root` and every directory below it.
///
/// Directories whose name starts with `.git`, or equals one of `excluded`, are
/// pruned together with their whole subtree. Symlinks are not followed. The
/// first unreadable entry aborts the walk.
pub fn walk_dirs(root: &Path, excluded: &[String]) -> Result<Vec<PathBuf>, WalkError> {
    let mut dirs = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let name = e.file_name().to_string_lossy();
        let pruned = is_pruned(&name, excluded);
        if pruned {
            trace!(path = %e.path().display(), "pruning directory");
        }
        !pruned
    });

    for entry in walker {
        let entry = entry.map_err(|e| WalkError::traverse(root, e))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}

fn is_pruned(name: &str, excluded: &[String]) -> bool {
    name.starts_with(VCS_DIR_PREFIX) || excluded.iter().any(|dir| dir == name)
}
