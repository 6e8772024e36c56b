use std::mem;
use std::path::PathBuf;

use anyhow::Result;
use bookmark_core::Bookmark;
use ratatui::prelude::Rect;
use ratatui::style::Style;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tui_textarea::CursorMove;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

use crate::domain::models::Action;
use crate::domain::models::CategoryEditor;
use crate::domain::models::Choice;
use crate::domain::models::ConfirmDialog;
use crate::domain::models::Event;
use crate::domain::models::Mode;
use crate::domain::models::StatusMessage;
use crate::domain::models::Tab;
use crate::domain::models::CATEGORY_CHAR_LIMIT;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub const FILTER_CHAR_LIMIT: usize = 156;

#[derive(Clone, Debug, Default)]
pub struct AppStateProps {
    pub initial_tab: Tab,
    pub initial_filter: String,
    pub cwd_file: Option<PathBuf>,
}

pub struct AppState<'a> {
    pub active_tab: Tab,
    pub bookmarks: Vec<Bookmark>,
    pub cwd_file: Option<PathBuf>,
    pub filter: TextArea<'a>,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub list_state: ListState,
    pub loaded: bool,
    pub mode: Mode<'a>,
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
    pub tabs: Vec<Tab>,
    pub visible: Vec<Bookmark>,
}

fn filter_textarea<'a>(text: &str) -> TextArea<'a> {
    let mut textarea = TextArea::new(vec![text.to_string()]);
    textarea.set_placeholder_text("Type to filter bookmarks...");
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default());
    textarea.move_cursor(CursorMove::End);

    return textarea;
}

fn line_len(textarea: &TextArea) -> usize {
    return textarea
        .lines()
        .first()
        .map(|line| return line.chars().count())
        .unwrap_or_default();
}

/// Feeds a key to a single line textarea. Returns true when the text changed.
fn single_line_input(textarea: &mut TextArea, input: Input, char_limit: usize) -> bool {
    match input {
        // Both would split the line.
        Input {
            key: Key::Enter, ..
        }
        | Input {
            key: Key::Char('m'),
            ctrl: true,
            ..
        } => return false,
        // Would indent the line.
        Input { key: Key::Tab, .. } => return false,
        Input {
            key: Key::Char(_),
            ctrl: false,
            alt: false,
            ..
        } if line_len(textarea) >= char_limit => return false,
        input => return textarea.input(input),
    }
}

fn single_line_paste(textarea: &mut TextArea, text: &str, char_limit: usize) -> bool {
    let room = char_limit.saturating_sub(line_len(textarea));
    let text = text
        .chars()
        .filter(|c| return *c != '\n' && *c != '\r')
        .take(room)
        .collect::<String>();

    return textarea.insert_str(text);
}

impl<'a> AppState<'a> {
    pub fn new(props: AppStateProps) -> AppState<'a> {
        return AppState {
            active_tab: props.initial_tab,
            bookmarks: vec![],
            cwd_file: props.cwd_file,
            filter: filter_textarea(&props.initial_filter),
            last_known_height: 0,
            last_known_width: 0,
            list_state: ListState::default(),
            loaded: false,
            mode: Mode::Browsing,
            should_quit: false,
            status: None,
            tabs: vec![Tab::All],
            visible: vec![],
        };
    }

    /// Applies one event. Returns true once the browser should exit.
    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        match event {
            Event::BookmarksLoaded(bookmarks) => {
                self.handle_bookmarks_loaded(bookmarks);
            }
            Event::BookmarkDeleted(bookmark) => {
                self.status = Some(StatusMessage::info(&format!(
                    "Deleted bookmark: {}",
                    bookmark.folder
                )));
                tx.send(Action::LoadBookmarks)?;
            }
            Event::BookmarkUpdated(bookmark) => {
                self.status = Some(StatusMessage::info(&format!(
                    "Updated bookmark: {} [{}]",
                    bookmark.folder, bookmark.category
                )));
                tx.send(Action::LoadBookmarks)?;
            }
            Event::FolderOpened(folder) => {
                self.status = Some(StatusMessage::info(&format!("Opened {folder}")));
            }
            Event::CwdFileWritten(_) => {
                self.should_quit = true;
            }
            Event::ActionFailed(message) => {
                self.status = Some(StatusMessage::error(&message));
            }
            Event::KeyboardCharInput(input) => {
                self.handle_input(input, tx)?;
            }
            Event::KeyboardCTRLC => {
                if matches!(self.mode, Mode::Editing(_)) {
                    self.mode = Mode::Browsing;
                } else {
                    self.should_quit = true;
                }
            }
            Event::KeyboardPaste(text) => {
                self.handle_paste(&text);
            }
            Event::UIScrollDown => {
                if self.mode.is_browsing() {
                    self.select_offset(1);
                }
            }
            Event::UIScrollUp => {
                if self.mode.is_browsing() {
                    self.select_offset(-1);
                }
            }
            Event::UITick => {}
        }

        return Ok(self.should_quit);
    }

    pub fn handle_bookmarks_loaded(&mut self, bookmarks: Vec<Bookmark>) {
        self.loaded = true;
        self.bookmarks = bookmarks;
        self.tabs = Tab::from_bookmarks(&self.bookmarks);

        if !self.tabs.contains(&self.active_tab) {
            tracing::debug!(
                tab = self.active_tab.label(),
                "category no longer present, showing all"
            );
            self.active_tab = Tab::All;
        }

        self.refilter(false);
    }

    fn handle_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.mode.is_filtering() {
            self.handle_filter_input(input);
            return Ok(());
        }
        if self.mode.is_confirming() {
            return self.handle_confirm_input(input, tx);
        }
        if self.mode.is_editing() {
            return self.handle_edit_input(input, tx);
        }

        return self.handle_browse_input(input, tx);
    }

    fn handle_browse_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match input {
            Input {
                key: Key::Char('q'),
                ctrl: false,
                alt: false,
                ..
            }
            | Input { key: Key::Esc, .. } => {
                self.should_quit = true;
            }
            Input {
                key: Key::Char('/'),
                ..
            } => {
                self.focus_filter();
            }
            Input {
                key: Key::Char('u'),
                ctrl: true,
                ..
            } => {
                self.clear_filter();
            }
            Input {
                key: Key::Tab,
                shift: false,
                ..
            } => {
                self.next_tab();
            }
            Input {
                key: Key::Tab,
                shift: true,
                ..
            } => {
                self.prev_tab();
            }
            Input {
                key: Key::Char('x') | Key::Char('d'),
                ctrl: false,
                alt: false,
                ..
            }
            | Input {
                key: Key::Delete, ..
            } => {
                if let Some(bookmark) = self.selected().cloned() {
                    self.mode = Mode::Confirming(ConfirmDialog::new(bookmark));
                }
            }
            Input {
                key: Key::Char('e'),
                ctrl: false,
                alt: false,
                ..
            } => {
                if let Some(bookmark) = self.selected().cloned() {
                    self.mode = Mode::Editing(CategoryEditor::new(bookmark));
                }
            }
            Input {
                key: Key::Char('o'),
                ctrl: false,
                alt: false,
                ..
            } => {
                if let Some(bookmark) = self.selected() {
                    tx.send(Action::OpenFolder(bookmark.folder.clone()))?;
                }
            }
            Input {
                key: Key::Enter, ..
            } => {
                if let Some(bookmark) = self.selected() {
                    let folder = bookmark.folder.clone();
                    match &self.cwd_file {
                        Some(cwd_file) => tx.send(Action::WriteCwdFile(cwd_file.clone(), folder))?,
                        None => tx.send(Action::OpenFolder(folder))?,
                    }
                }
            }
            Input { key: Key::Up, .. }
            | Input {
                key: Key::Char('k'),
                ctrl: false,
                ..
            } => {
                self.select_offset(-1);
            }
            Input { key: Key::Down, .. }
            | Input {
                key: Key::Char('j'),
                ctrl: false,
                ..
            } => {
                self.select_offset(1);
            }
            Input {
                key: Key::PageUp, ..
            } => {
                self.select_offset(-(self.page_size() as isize));
            }
            Input {
                key: Key::PageDown,
                ..
            } => {
                self.select_offset(self.page_size() as isize);
            }
            Input { key: Key::Home, .. }
            | Input {
                key: Key::Char('g'),
                ctrl: false,
                ..
            } => {
                self.select_index(0);
            }
            Input { key: Key::End, .. }
            | Input {
                key: Key::Char('G'),
                ctrl: false,
                ..
            } => {
                self.select_index(self.visible.len().saturating_sub(1));
            }
            _ => {}
        }

        return Ok(());
    }

    fn handle_filter_input(&mut self, input: Input) {
        match input {
            Input { key: Key::Esc, .. } => {
                self.blur_filter();
            }
            Input {
                key: Key::Enter, ..
            } => {
                self.blur_filter();
                self.refilter(true);
            }
            input => {
                if single_line_input(&mut self.filter, input, FILTER_CHAR_LIMIT) {
                    self.refilter(true);
                }
            }
        }
    }

    fn handle_confirm_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let Mode::Confirming(dialog) = &mut self.mode else {
            return Ok(());
        };

        let confirmed = match input {
            Input {
                key: Key::Enter, ..
            } => Some(dialog.choice == Choice::Yes),
            Input {
                key: Key::Char('y') | Key::Char('Y'),
                ctrl: false,
                ..
            } => Some(true),
            Input {
                key: Key::Char('n') | Key::Char('N') | Key::Char('q'),
                ctrl: false,
                ..
            }
            | Input { key: Key::Esc, .. } => Some(false),
            Input {
                key:
                    Key::Up
                    | Key::Down
                    | Key::Left
                    | Key::Right
                    | Key::Tab
                    | Key::Char('k')
                    | Key::Char('j'),
                ..
            } => {
                dialog.choice = dialog.choice.toggle();
                None
            }
            _ => None,
        };

        if let Some(confirmed) = confirmed {
            if let Mode::Confirming(dialog) = mem::take(&mut self.mode) {
                if confirmed {
                    tx.send(Action::DeleteBookmark(dialog.bookmark))?;
                }
            }
        }

        return Ok(());
    }

    fn handle_edit_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let Mode::Editing(editor) = &mut self.mode else {
            return Ok(());
        };

        match input {
            Input { key: Key::Esc, .. } => {
                self.mode = Mode::Browsing;
            }
            Input {
                key: Key::Enter, ..
            } => {
                if let Mode::Editing(editor) = mem::take(&mut self.mode) {
                    let category = editor.value();
                    if category != editor.bookmark.category {
                        tx.send(Action::UpdateCategory(editor.bookmark, category))?;
                    }
                }
            }
            input => {
                single_line_input(&mut editor.textarea, input, CATEGORY_CHAR_LIMIT);
            }
        }

        return Ok(());
    }

    fn handle_paste(&mut self, text: &str) {
        if self.mode.is_filtering() {
            if single_line_paste(&mut self.filter, text, FILTER_CHAR_LIMIT) {
                self.refilter(true);
            }
            return;
        }

        if let Mode::Editing(editor) = &mut self.mode {
            single_line_paste(&mut editor.textarea, text, CATEGORY_CHAR_LIMIT);
        }
    }

    pub fn filter_text(&self) -> String {
        return self.filter.lines().first().cloned().unwrap_or_default();
    }

    pub fn selected(&self) -> Option<&Bookmark> {
        return self
            .list_state
            .selected()
            .and_then(|index| return self.visible.get(index));
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
    }

    fn focus_filter(&mut self) {
        self.mode = Mode::Filtering;
        self.filter
            .set_cursor_style(Style::default().add_modifier(ratatui::style::Modifier::REVERSED));
    }

    fn blur_filter(&mut self) {
        self.mode = Mode::Browsing;
        self.filter.set_cursor_style(Style::default());
    }

    fn clear_filter(&mut self) {
        self.filter = filter_textarea("");
        self.refilter(true);
    }

    fn next_tab(&mut self) {
        let index = self.tab_index();
        self.active_tab = self.tabs[(index + 1) % self.tabs.len()].clone();
        self.refilter(true);
    }

    fn prev_tab(&mut self) {
        let index = self.tab_index();
        self.active_tab = self.tabs[(index + self.tabs.len() - 1) % self.tabs.len()].clone();
        self.refilter(true);
    }

    fn tab_index(&self) -> usize {
        return self
            .tabs
            .iter()
            .position(|tab| return tab == &self.active_tab)
            .unwrap_or(0);
    }

    /// Recomputes the visible rows from the in-memory set.
    fn refilter(&mut self, reset_selection: bool) {
        let filter = self.filter_text();
        self.visible = self
            .bookmarks
            .iter()
            .filter(|b| return self.active_tab.contains(b) && b.matches_filter(&filter))
            .cloned()
            .collect();

        if reset_selection {
            self.list_state.select(Some(0));
        }
        let index = self.list_state.selected().unwrap_or(0);
        self.select_index(index);
    }

    fn page_size(&self) -> usize {
        return self.last_known_height.max(1);
    }

    fn select_index(&mut self, index: usize) {
        if self.visible.is_empty() {
            self.list_state.select(None);
            return;
        }

        self.list_state
            .select(Some(index.min(self.visible.len() - 1)));
    }

    fn select_offset(&mut self, offset: isize) {
        let current = self.list_state.selected().unwrap_or(0);
        self.select_index(current.saturating_add_signed(offset));
    }
}
