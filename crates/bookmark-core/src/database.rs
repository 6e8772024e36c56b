//! SQLite connection management and schema migrations.
//!
//! The schema version lives in `PRAGMA user_version`. Each entry of
//! [`MIGRATIONS`] upgrades the schema by exactly one version and runs inside
//! a transaction together with the version bump.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::debug;
use tracing::info;

use crate::errors::Result;

pub const IN_MEMORY: &str = ":memory:";

const MIGRATIONS: &[&str] = &[
    // 1: bookmarks table with soft delete.
    "CREATE TABLE IF NOT EXISTS bookmarks (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        folder       TEXT NOT NULL,
        category     TEXT NOT NULL DEFAULT '',
        date_created TEXT NOT NULL,
        updated_at   TEXT NOT NULL,
        deleted_at   TEXT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_bookmarks_deleted_at ON bookmarks (deleted_at);",
];

pub const CURRENT_SCHEMA_VERSION: i64 = MIGRATIONS.len() as i64;

#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    connection: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let connection = if path.as_os_str() == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            Connection::open(&path)?
        };

        let mut database = Self { path, connection };
        database.migrate()?;

        Ok(database)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(IN_MEMORY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn ping(&self) -> Result<()> {
        self.connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i64> {
        let version = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    /// Applies every migration newer than the stored schema version.
    pub fn migrate(&mut self) -> Result<()> {
        let current = self.schema_version()?;
        if current >= CURRENT_SCHEMA_VERSION {
            debug!(version = current, "database schema is up to date");
            return Ok(());
        }

        for (index, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
            let version = index as i64 + 1;
            let tx = self.connection.transaction()?;
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
            tx.commit()?;
            debug!(version, "applied database migration");
        }

        info!(
            path = %self.path.display(),
            version = CURRENT_SCHEMA_VERSION,
            "database migration completed successfully"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_file_and_parent_directory() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("bookmarks.db");

        let database = Database::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(database.path(), db_path.as_path());
        assert_eq!(database.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_open_fails_for_unusable_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let result = Database::open(blocker.join("bookmarks.db"));
        assert!(result.is_err());
    }

    #[test]
    fn test_ping() {
        let database = Database::open_in_memory().unwrap();
        assert!(database.ping().is_ok());
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("bookmarks.db");

        let mut database = Database::open(&db_path).unwrap();
        database.migrate().unwrap();
        drop(database);

        let reopened = Database::open(&db_path).unwrap();
        assert_eq!(reopened.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);

        let tables: i64 = reopened
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'bookmarks'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
