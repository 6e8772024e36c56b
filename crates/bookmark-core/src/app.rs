//! Process-level wiring: one database, one storage service.

use std::env;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::database::Database;
use crate::errors::Result;
use crate::models::Bookmark;
use crate::models::Category;
use crate::service::BookmarkStore;
use crate::service::BookmarkStoreBox;
use crate::service::SqliteBookmarks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(Bookmark),
    AlreadyExists(Bookmark),
}

pub struct App {
    database_path: PathBuf,
    store: BookmarkStoreBox,
}

impl App {
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self> {
        let database = Database::open(&database_path)?;
        database.ping()?;
        debug!(path = %database.path().display(), "opened bookmark database");

        Ok(Self {
            database_path: database.path().to_path_buf(),
            store: Box::new(SqliteBookmarks::new(database)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(crate::database::IN_MEMORY)
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn store(&self) -> &dyn BookmarkStore {
        self.store.as_ref()
    }

    /// Hands the storage service over, e.g. to the terminal UI worker.
    pub fn into_store(self) -> BookmarkStoreBox {
        self.store
    }

    pub fn add_current_dir(&self, category: Category) -> Result<AddOutcome> {
        let cwd = env::current_dir()?;
        self.add_folder(&cwd, category)
    }

    /// Stores `folder` unless a live bookmark already has the exact same path.
    pub fn add_folder(&self, folder: &Path, category: Category) -> Result<AddOutcome> {
        let absolute = std::path::absolute(folder)?;
        let folder = absolute.to_string_lossy().to_string();

        if let Some(existing) = self
            .store
            .search_by_folder(&folder)?
            .into_iter()
            .find(|b| b.folder == folder)
        {
            return Ok(AddOutcome::AlreadyExists(existing));
        }

        let mut bookmark = Bookmark::new(folder, category);
        self.store.save(&mut bookmark)?;

        Ok(AddOutcome::Added(bookmark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_folder_deduplicates_exact_path() {
        let app = App::in_memory().unwrap();
        let dir = tempdir().unwrap();

        let first = app.add_folder(dir.path(), Category::new("work")).unwrap();
        let AddOutcome::Added(added) = first else {
            panic!("expected a new bookmark, got {first:?}");
        };
        assert!(added.id > 0);

        let second = app.add_folder(dir.path(), Category::new("other")).unwrap();
        assert_eq!(second, AddOutcome::AlreadyExists(added.clone()));

        // A longer path that contains the first one is not a duplicate.
        let child = dir.path().join("child");
        let third = app.add_folder(&child, Category::default()).unwrap();
        assert!(matches!(third, AddOutcome::Added(_)));

        assert_eq!(app.store().list(0, 0).unwrap().len(), 2);
    }

    #[test]
    fn test_add_folder_after_soft_delete() {
        let app = App::in_memory().unwrap();
        let dir = tempdir().unwrap();

        let AddOutcome::Added(first) = app.add_folder(dir.path(), Category::new("work")).unwrap() else {
            panic!("expected a new bookmark");
        };
        app.store().delete(&first).unwrap();

        let again = app.add_folder(dir.path(), Category::new("work")).unwrap();
        let AddOutcome::Added(readded) = again else {
            panic!("expected the deleted folder to be added again, got {again:?}");
        };
        assert_ne!(readded.id, first.id);
        assert_eq!(readded.folder, first.folder);
        assert_eq!(app.store().list(0, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_add_folder_makes_path_absolute() {
        let app = App::in_memory().unwrap();
        let outcome = app.add_folder(Path::new("relative/dir"), Category::default()).unwrap();

        let AddOutcome::Added(bookmark) = outcome else {
            panic!("expected a new bookmark");
        };
        assert!(Path::new(&bookmark.folder).is_absolute());
        assert!(bookmark.folder.ends_with("dir"));
        assert!(bookmark.category.is_empty());
    }

    #[test]
    fn test_add_current_dir() {
        let app = App::in_memory().unwrap();
        let outcome = app.add_current_dir(Category::new("cwd")).unwrap();

        let AddOutcome::Added(bookmark) = outcome else {
            panic!("expected a new bookmark");
        };
        let cwd = env::current_dir().unwrap();
        assert_eq!(bookmark.folder, cwd.to_string_lossy());
    }

    #[test]
    fn test_open_file_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bookmarks.db");

        let app = App::open(&path).unwrap();
        assert_eq!(app.database_path(), path.as_path());
    }
}
