#[cfg(test)]
#[path = "tab_test.rs"]
mod tests;

use std::collections::BTreeSet;

use bookmark_core::Bookmark;
use bookmark_core::Category;

pub const ALL_TAB_LABEL: &str = "All";

/// A category tab. `All` is the pseudo-category holding every bookmark.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    All,
    Category(Category),
}

impl Tab {
    /// Maps a command line argument to a tab; empty or `All` selects every bookmark.
    pub fn parse(value: &str) -> Tab {
        if value.is_empty() || value == ALL_TAB_LABEL {
            return Tab::All;
        }

        return Tab::Category(Category::new(value));
    }

    /// `All` followed by the distinct categories present, sorted.
    pub fn from_bookmarks(bookmarks: &[Bookmark]) -> Vec<Tab> {
        let categories = bookmarks
            .iter()
            .map(|b| return b.category.clone())
            .collect::<BTreeSet<Category>>();

        let mut tabs = vec![Tab::All];
        tabs.extend(categories.into_iter().map(Tab::Category));

        return tabs;
    }

    pub fn label(&self) -> &str {
        match self {
            Tab::All => return ALL_TAB_LABEL,
            Tab::Category(category) => return category.label(),
        }
    }

    pub fn contains(&self, bookmark: &Bookmark) -> bool {
        match self {
            Tab::All => return true,
            Tab::Category(category) => return &bookmark.category == category,
        }
    }
}
