use bookmark_core::Bookmark;
use tui_textarea::Input;

#[derive(Debug)]
pub enum Event {
    BookmarksLoaded(Vec<Bookmark>),
    BookmarkDeleted(Bookmark),
    BookmarkUpdated(Bookmark),
    FolderOpened(String),
    CwdFileWritten(String),
    ActionFailed(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardPaste(String),
    UITick,
    UIScrollDown,
    UIScrollUp,
}
