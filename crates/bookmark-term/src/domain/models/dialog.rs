use bookmark_core::Bookmark;
use bookmark_core::Category;
use ratatui::style::Style;
use tui_textarea::CursorMove;
use tui_textarea::TextArea;

pub const CATEGORY_CHAR_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    No,
    Yes,
}

impl Choice {
    pub fn toggle(self) -> Choice {
        match self {
            Choice::No => return Choice::Yes,
            Choice::Yes => return Choice::No,
        }
    }
}

/// Yes/no prompt shown before a bookmark is deleted. Starts on `No`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub bookmark: Bookmark,
    pub choice: Choice,
}

impl ConfirmDialog {
    pub fn new(bookmark: Bookmark) -> ConfirmDialog {
        return ConfirmDialog {
            bookmark,
            choice: Choice::No,
        };
    }

    pub fn title(&self) -> String {
        return format!("Delete: {}?", self.bookmark.folder);
    }
}

/// Single line editor for a bookmark's category, prefilled with the current value.
#[derive(Clone, Debug)]
pub struct CategoryEditor<'a> {
    pub bookmark: Bookmark,
    pub textarea: TextArea<'a>,
}

impl<'a> CategoryEditor<'a> {
    pub fn new(bookmark: Bookmark) -> CategoryEditor<'a> {
        let mut textarea = TextArea::new(vec![bookmark.category.to_string()]);
        textarea.set_placeholder_text("Enter category name...");
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::End);

        return CategoryEditor { bookmark, textarea };
    }

    pub fn value(&self) -> Category {
        let text: String = self
            .textarea
            .lines()
            .first()
            .map(|line| return line.trim().chars().take(CATEGORY_CHAR_LIMIT).collect())
            .unwrap_or_default();

        return Category::new(text);
    }
}
