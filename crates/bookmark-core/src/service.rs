#[cfg(test)]
#[path = "service_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use rusqlite::params;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use tracing::debug;
use tracing::info;

use crate::database::Database;
use crate::errors::BookmarkError;
use crate::errors::Result;
use crate::models::Bookmark;
use crate::models::Category;

const SELECT_COLUMNS: &str = "SELECT id, folder, category, date_created FROM bookmarks";
const ORDER_BY: &str = "ORDER BY date_created DESC, id DESC";

/// Storage operations over bookmarks. Reads never return soft-deleted rows.
pub trait BookmarkStore: Send {
    fn save(&self, bookmark: &mut Bookmark) -> Result<()>;
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Bookmark>>;
    fn search_by_category(&self, category: &Category) -> Result<Vec<Bookmark>>;
    fn search_by_folder(&self, folder: &str) -> Result<Vec<Bookmark>>;
    fn delete(&self, bookmark: &Bookmark) -> Result<()>;
    fn get_by_id(&self, id: i64) -> Result<Bookmark>;
    fn categories(&self) -> Result<Vec<Category>>;
}

pub type BookmarkStoreBox = Box<dyn BookmarkStore>;

pub struct SqliteBookmarks {
    db: Database,
}

impl SqliteBookmarks {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Bookmark>> {
        let mut stmt = self.db.connection().prepare(sql)?;
        let rows = stmt
            .query_map(params, bookmark_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

fn bookmark_from_row(row: &Row<'_>) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        folder: row.get(1)?,
        category: Category::new(row.get::<_, String>(2)?),
        date_created: row.get(3)?,
    })
}

/// Escapes `LIKE` wildcards so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl BookmarkStore for SqliteBookmarks {
    fn save(&self, bookmark: &mut Bookmark) -> Result<()> {
        bookmark.validate()?;

        let now = Utc::now();
        let conn = self.db.connection();

        if !bookmark.is_persisted() {
            if bookmark.date_created == DateTime::<Utc>::default() {
                bookmark.date_created = now;
            }

            conn.execute(
                "INSERT INTO bookmarks (folder, category, date_created, updated_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    bookmark.folder,
                    bookmark.category.as_str(),
                    bookmark.date_created,
                    now
                ],
            )?;
            bookmark.id = conn.last_insert_rowid();
            info!(id = bookmark.id, folder = %bookmark.folder, "created bookmark");

            return Ok(());
        }

        let updated = conn.execute(
            "UPDATE bookmarks SET folder = ?1, category = ?2, updated_at = ?3 WHERE id = ?4 AND deleted_at IS NULL",
            params![bookmark.folder, bookmark.category.as_str(), now, bookmark.id],
        )?;
        if updated == 0 {
            return Err(BookmarkError::NotFound(bookmark.id));
        }
        info!(id = bookmark.id, category = %bookmark.category, "updated bookmark");

        Ok(())
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Bookmark>> {
        let mut sql = format!("{SELECT_COLUMNS} WHERE deleted_at IS NULL {ORDER_BY}");

        // SQLite only accepts OFFSET after a LIMIT; -1 means no limit.
        if limit > 0 {
            sql.push_str(&format!(" LIMIT {limit}"));
        } else if offset > 0 {
            sql.push_str(" LIMIT -1");
        }
        if offset > 0 {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let bookmarks = self.query(&sql, [])?;
        debug!(count = bookmarks.len(), limit, offset, "listed bookmarks");

        Ok(bookmarks)
    }

    fn search_by_category(&self, category: &Category) -> Result<Vec<Bookmark>> {
        let sql = format!("{SELECT_COLUMNS} WHERE deleted_at IS NULL AND category = ?1 {ORDER_BY}");
        self.query(&sql, [category.as_str()])
    }

    fn search_by_folder(&self, folder: &str) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE deleted_at IS NULL AND folder LIKE ?1 ESCAPE '\\' {ORDER_BY}"
        );
        let pattern = format!("%{}%", escape_like(folder));
        self.query(&sql, [pattern])
    }

    fn delete(&self, bookmark: &Bookmark) -> Result<()> {
        if !bookmark.is_persisted() {
            return Err(BookmarkError::MissingId);
        }

        let deleted = self.db.connection().execute(
            "UPDATE bookmarks SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            params![Utc::now(), bookmark.id],
        )?;
        if deleted == 0 {
            return Err(BookmarkError::NotFound(bookmark.id));
        }
        info!(id = bookmark.id, folder = %bookmark.folder, "deleted bookmark");

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> Result<Bookmark> {
        let sql = format!("{SELECT_COLUMNS} WHERE deleted_at IS NULL AND id = ?1");
        self.db
            .connection()
            .query_row(&sql, [id], bookmark_from_row)
            .optional()?
            .ok_or(BookmarkError::NotFound(id))
    }

    fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT DISTINCT category FROM bookmarks WHERE deleted_at IS NULL ORDER BY category",
        )?;
        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|res| res.map(Category::new))
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }
}
