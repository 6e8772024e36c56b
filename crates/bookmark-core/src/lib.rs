//! Core library for the folder bookmark manager.
//!
//! Owns the bookmark model, the SQLite-backed storage service and the
//! side effects (opening folders, shell integration, JSON export) that the
//! terminal interface and the command line consume.

pub mod app;
pub mod database;
pub mod errors;
pub mod export;
pub mod folders;
pub mod models;
pub mod service;

pub use app::{AddOutcome, App};
pub use database::Database;
pub use errors::BookmarkError;
pub use folders::Folders;
pub use models::{Bookmark, Category};
pub use service::{BookmarkStore, SqliteBookmarks};
