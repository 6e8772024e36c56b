//! Error types shared by the storage layer and the side-effect services.
//!
//! Callers above this crate wrap these in `anyhow` and surface them to the
//! user as a single styled line, so every message reads as a sentence.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("bookmark with ID {0} not found")]
    NotFound(i64),
    #[error("cannot delete bookmark: ID is required")]
    MissingId,
    #[error("database error: {0}")]
    Database(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("failed to open folder {path:?}: {message}")]
    FolderOpen { path: String, message: String },
}

impl From<rusqlite::Error> for BookmarkError {
    fn from(err: rusqlite::Error) -> Self {
        BookmarkError::Database(err.to_string())
    }
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        BookmarkError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookmarkError {
    fn from(err: serde_json::Error) -> Self {
        BookmarkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookmarkError>;
