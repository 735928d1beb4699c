use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading from a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Blocking task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}
