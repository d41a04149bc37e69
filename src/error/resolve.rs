use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("directory not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("empty import path in specifier '{specifier}'")]
    EmptyImportPath { specifier: String },

    #[error("cannot find package \"{import_path}\"")]
    PackageNotFound { import_path: String },
}

impl ResolveError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub fn empty_import_path(specifier: impl Into<String>) -> Self {
        Self::EmptyImportPath {
            specifier: specifier.into(),
        }
    }

    pub fn package_not_found(import_path: impl Into<String>) -> Self {
        Self::PackageNotFound {
            import_path: import_path.into(),
        }
    }
}
