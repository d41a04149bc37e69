use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("failed to walk directory {root}: {source}")]
    Traverse {
        root: PathBuf,
        source: walkdir::Error,
    },
}

impl WalkError {
    pub fn traverse(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Traverse {
            root: root.into(),
            source,
        }
    }
}
