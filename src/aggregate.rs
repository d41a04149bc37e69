//! Runs the scanner over every resolved directory and merges the results.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::debug;

use crate::discovery::DirectorySet;
use crate::error::{Error, Result, ScanError};
use crate::scanner::{sort_tests, Scanner, TestEntity};

/// Scans each directory once, then sorts the merged list. Any scan error
/// aborts the whole collection; an empty result is [`Error::NoTests`].
pub fn collect_tests(
    scanner: &Scanner,
    dirs: &DirectorySet,
    parallel: bool,
) -> Result<Vec<TestEntity>> {
    let per_dir = if parallel {
        scan_parallel(scanner, dirs)?
    } else {
        scan_sequential(scanner, dirs)?
    };

    let mut tests: Vec<TestEntity> = per_dir.into_iter().flatten().collect();
    if tests.is_empty() {
        return Err(Error::NoTests);
    }

    sort_tests(&mut tests);
    debug!(count = tests.len(), dirs = dirs.len(), "collected tests");
    Ok(tests)
}

fn scan_sequential(
    scanner: &Scanner,
    dirs: &DirectorySet,
) -> std::result::Result<Vec<Vec<TestEntity>>, ScanError> {
    let mut per_dir = Vec::with_capacity(dirs.len());
    for dir in dirs {
        per_dir.push(scanner.scan_dir(dir)?);
    }
    Ok(per_dir)
}

// Each directory is merged only once its scan has fully succeeded.
fn scan_parallel(
    scanner: &Scanner,
    dirs: &DirectorySet,
) -> std::result::Result<Vec<Vec<TestEntity>>, ScanError> {
    let ordered: Vec<&PathBuf> = dirs.iter().collect();
    ordered
        .par_iter()
        .map(|dir| scanner.scan_dir(dir))
        .collect()
}
