//! Per-directory test discovery.
//!
//! Reads the buildable `.go` files of one directory, checks they agree on a
//! package, and reports every top-level function in the `_test.go` files that
//! satisfies the configured [`DeclPredicate`].

pub mod constraints;
pub mod decl;
pub mod syntax;
mod test_entity;

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ScanError;
pub use constraints::BuildContext;
pub use decl::{DeclPredicate, FuncDecl, Param, TestSignature};
use syntax::GoParser;
pub use test_entity::{sort_tests, TestEntity};

pub const GO_EXTENSION: &str = ".go";
pub const TEST_FILE_SUFFIX: &str = "_test.go";
pub const XTEST_PACKAGE_SUFFIX: &str = "_test";
const DOCUMENTATION_PACKAGE: &str = "documentation";

pub struct Scanner {
    build: BuildContext,
    predicate: Box<dyn DeclPredicate>,
}

impl Scanner {
    pub fn new(build: BuildContext, predicate: impl DeclPredicate + 'static) -> Self {
        Self {
            build,
            predicate: Box::new(predicate),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.build_context(), config.signature())
    }

    /// Scans one directory. A directory without buildable Go files yields an
    /// empty list.
    pub fn scan_dir(&self, dir: &Path) -> Result<Vec<TestEntity>, ScanError> {
        let files = self.go_files(dir)?;
        if files.is_empty() {
            trace!(dir = %dir.display(), "no buildable Go files");
            return Ok(Vec::new());
        }

        let mut parser = GoParser::new()?;
        let mut package: Option<(String, String)> = None;
        let mut tests = Vec::new();

        for file_name in files {
            let path = dir.join(&file_name);
            let source =
                fs::read_to_string(&path).map_err(|e| ScanError::read_file(&path, e))?;

            let included = self
                .build
                .matches_source(&source)
                .map_err(|message| ScanError::build_constraint(&path, message))?;
            if !included {
                trace!(file = %path.display(), "excluded by build constraint");
                continue;
            }

            let parsed = parser.parse(&source, &path)?;
            let Some(declared) = parsed.package else {
                return Err(ScanError::missing_package_clause(&path));
            };
            if declared == DOCUMENTATION_PACKAGE {
                continue;
            }

            // A `_test` suffix marks an external test package unless the
            // directory's package already carries that exact name.
            let is_test = file_name.ends_with(TEST_FILE_SUFFIX);
            let known = package.as_ref().map(|(first, _)| first.as_str());
            let base = match declared.strip_suffix(XTEST_PACKAGE_SUFFIX) {
                Some(stripped) if is_test && known != Some(declared.as_str()) => stripped,
                _ => declared.as_str(),
            };

            let (first, first_file) =
                package.get_or_insert_with(|| (base.to_string(), file_name.clone()));
            if first.as_str() != base {
                return Err(ScanError::MultiplePackages {
                    dir: dir.to_path_buf(),
                    first: first.clone(),
                    first_file: first_file.clone(),
                    second: base.to_string(),
                    second_file: file_name,
                });
            }

            if !is_test {
                continue;
            }

            if let Some(issue) = parsed.syntax_issue {
                return Err(ScanError::syntax_error(
                    &path,
                    issue.line,
                    issue.column,
                    issue.message,
                ));
            }

            let file = path.to_string_lossy();
            tests.extend(
                parsed
                    .functions
                    .iter()
                    .filter(|decl| self.predicate.matches(decl))
                    .map(|decl| TestEntity::new(decl.name.as_str(), &*file, declared.as_str())),
            );
        }

        debug!(dir = %dir.display(), count = tests.len(), "scanned directory");
        Ok(tests)
    }

    /// Sorted names of the `.go` files in `dir` that pass the file name rules.
    fn go_files(&self, dir: &Path) -> Result<Vec<String>, ScanError> {
        let entries = fs::read_dir(dir).map_err(|e| ScanError::read_dir(dir, e))?;
        let mut files = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| ScanError::read_dir(dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.ends_with(GO_EXTENSION) || name.starts_with('_') || name.starts_with('.') {
                continue;
            }
            if !self.build.matches_file_name(&name) {
                trace!(file = %path.display(), "excluded by file name");
                continue;
            }
            files.push(name);
        }

        files.sort();
        Ok(files)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(BuildContext::host(), TestSignature::default())
    }
}
