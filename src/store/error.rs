//! Errors of the file store and its durable storage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A rejected store mutation. The store is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("file `{0}` already exists")]
    AlreadyExists(String),

    #[error("`{0}` is a protected file and cannot be deleted or renamed")]
    ProtectedFile(String),

    #[error("file `{0}` not found")]
    NotFound(String),

    #[error("invalid file name `{0}`")]
    InvalidName(String),
}

/// Failure reading or writing the durable key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
