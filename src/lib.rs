//! tesls
//!
//! Lists the Go test functions declared in a set of packages. Package
//! specifiers are resolved to directories, each directory's `_test.go` files
//! are parsed with tree-sitter, and the matching declarations are sorted and
//! rendered as JSON or through a line template.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::Write;

pub use aggregate::collect_tests;
pub use config::Config;
pub use discovery::{DirectorySet, Resolver};
pub use error::{Error, Result};
pub use output::{FormatSpec, OutputFormatter, Placeholders};
pub use scanner::{Scanner, TestEntity};

/// Resolves `specifiers` and returns every matching test, sorted.
pub fn discover<S: AsRef<str>>(config: &Config, specifiers: &[S]) -> Result<Vec<TestEntity>> {
    let dirs = Resolver::from_config(config).resolve_all(specifiers)?;
    let scanner = Scanner::from_config(config);
    collect_tests(&scanner, &dirs, config.parallel)
}

/// Full pipeline. The format is validated before any directory is read and
/// nothing reaches `out` unless every step succeeded.
pub fn run<S: AsRef<str>, W: Write>(config: &Config, specifiers: &[S], out: W) -> Result<()> {
    let formatter = OutputFormatter::from_config(config)?;
    let tests = discover(config, specifiers)?;
    formatter.write(&tests, out)
}
