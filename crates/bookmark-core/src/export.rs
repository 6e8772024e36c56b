//! JSON export of stored bookmarks.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::errors::Result;
use crate::models::Bookmark;
use crate::models::Category;
use crate::service::BookmarkStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportBookmark {
    pub id: i64,
    pub folder: String,
    pub category: String,
    pub date_created: String,
}

impl From<&Bookmark> for ExportBookmark {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id,
            folder: bookmark.folder.clone(),
            category: bookmark.category.to_string(),
            date_created: bookmark
                .date_created
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Loads the bookmarks to export. An empty category or filter means "no restriction".
pub fn collect(
    store: &dyn BookmarkStore,
    category: Option<&Category>,
    filter: Option<&str>,
) -> Result<Vec<Bookmark>> {
    let bookmarks = match category {
        Some(category) if !category.is_empty() => store.search_by_category(category)?,
        _ => store.list(0, 0)?,
    };

    let bookmarks = match filter {
        Some(filter) if !filter.trim().is_empty() => bookmarks
            .into_iter()
            .filter(|b| b.matches_filter(filter))
            .collect(),
        _ => bookmarks,
    };

    Ok(bookmarks)
}

pub fn to_json(bookmarks: &[Bookmark]) -> Result<String> {
    let rows: Vec<ExportBookmark> = bookmarks.iter().map(ExportBookmark::from).collect();
    let mut json = serde_json::to_string_pretty(&rows)?;
    json.push('\n');

    Ok(json)
}
