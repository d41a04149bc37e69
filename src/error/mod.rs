mod config;
mod format;
mod resolve;
mod scan;
mod walk;

pub use config::ConfigError;
pub use format::FormatError;
pub use resolve::ResolveError;
pub use scan::ScanError;
pub use walk::WalkError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("no tests were found")]
    NoTests,

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
