#[cfg(test)]
#[path = "models_test.rs"]
mod tests;

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::BookmarkError;
use crate::errors::Result;

/// Label shown for bookmarks saved without a category.
pub const UNCATEGORIZED_LABEL: &str = "uncategorized";

/// Free-form grouping label. Any string is accepted, including the empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name used in tabs and badges.
    pub fn label(&self) -> &str {
        if self.0.is_empty() {
            return UNCATEGORIZED_LABEL;
        }
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A bookmarked folder. An `id` of zero means the row has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub folder: String,
    pub category: Category,
    pub date_created: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(folder: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            id: 0,
            folder: folder.into(),
            category: category.into(),
            date_created: DateTime::<Utc>::default(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.folder.trim().is_empty() {
            return Err(BookmarkError::Validation(
                "folder path is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Case-insensitive substring match on folder or category.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.folder.to_lowercase().contains(&needle)
            || self.category.as_str().to_lowercase().contains(&needle)
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bookmark{{ID: {}, Folder: {}, Category: {}, DateCreated: {}}}",
            self.id,
            self.folder,
            self.category,
            self.date_created.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
