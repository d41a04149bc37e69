use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read directory '{dir}': {source}")]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to set parser language: {message}")]
    LanguageSetupFailed { message: String },

    #[error("failed to parse source code in {path}")]
    ParseFailed { path: PathBuf },

    #[error("{path}:{line}:{column}: {message}")]
    SyntaxError {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{path}: expected 'package' clause")]
    MissingPackageClause { path: PathBuf },

    #[error("{path}: parsing build constraint: {message}")]
    BuildConstraint { path: PathBuf, message: String },

    #[error("found packages {first} ({first_file}) and {second} ({second_file}) in {dir}")]
    MultiplePackages {
        dir: PathBuf,
        first: String,
        first_file: String,
        second: String,
        second_file: String,
    },
}

impl ScanError {
    pub fn read_dir(dir: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            dir: dir.into(),
            source,
        }
    }

    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn language_setup_failed(message: impl Into<String>) -> Self {
        Self::LanguageSetupFailed {
            message: message.into(),
        }
    }

    pub fn parse_failed(path: impl Into<PathBuf>) -> Self {
        Self::ParseFailed { path: path.into() }
    }

    pub fn syntax_error(
        path: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SyntaxError {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn missing_package_clause(path: impl Into<PathBuf>) -> Self {
        Self::MissingPackageClause { path: path.into() }
    }

    pub fn build_constraint(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::BuildConstraint {
            path: path.into(),
            message: message.into(),
        }
    }
}
