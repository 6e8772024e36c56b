use std::path::PathBuf;

use bookmark_core::Bookmark;
use bookmark_core::Category;

/// Side effects requested by the browser and carried out by `ActionsService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadBookmarks,
    DeleteBookmark(Bookmark),
    UpdateCategory(Bookmark, Category),
    OpenFolder(String),
    WriteCwdFile(PathBuf, String),
}
