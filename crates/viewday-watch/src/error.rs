//! Error types for the watch layer.

use thiserror::Error;

/// Errors that can occur while watching the vault.
#[derive(Error, Debug)]
pub enum Error {
    /// File system watching error.
    #[error("file watching error: {0}")]
    Watch(String),

    /// IO error during watch setup.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for watch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Error::Watch(err.to_string())
    }
}
