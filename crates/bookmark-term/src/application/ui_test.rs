use anyhow::Result;
use bookmark_core::Bookmark;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tui_textarea::Input;
use tui_textarea::Key;

use super::*;

fn bookmark(id: i64, folder: &str, category: &str) -> Bookmark {
    let mut bookmark = Bookmark::new(folder, category);
    bookmark.id = id;
    return bookmark;
}

fn draw(app_state: &mut AppState) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(100, 20))?;
    terminal.draw(|frame| render(frame, app_state))?;

    let buffer = terminal.backend().buffer();
    let text = buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| {
            return row
                .iter()
                .map(|cell| return cell.symbol())
                .collect::<String>();
        })
        .collect::<Vec<String>>()
        .join("\n");

    return Ok(text);
}

#[test]
fn it_renders_loading_before_the_first_load() -> Result<()> {
    let mut app_state = AppState::new(AppStateProps::default());

    let screen = draw(&mut app_state)?;
    assert!(screen.contains("Loading bookmarks..."));

    return Ok(());
}

#[test]
fn it_renders_tabs_and_rows() -> Result<()> {
    let mut app_state = AppState::new(AppStateProps::default());
    app_state.handle_bookmarks_loaded(vec![
        bookmark(2, "/work/api", "work"),
        bookmark(1, "/home/notes", ""),
    ]);

    let screen = draw(&mut app_state)?;
    assert!(screen.contains("All"));
    assert!(screen.contains("work"));
    assert!(screen.contains("uncategorized"));
    assert!(screen.contains("/work/api"));
    assert!(screen.contains("/home/notes"));
    assert!(screen.contains("All (2)"));

    return Ok(());
}

#[test]
fn it_renders_the_empty_state() -> Result<()> {
    let mut app_state = AppState::new(AppStateProps::default());
    app_state.handle_bookmarks_loaded(vec![]);

    let screen = draw(&mut app_state)?;
    assert!(screen.contains("No bookmarks yet."));

    return Ok(());
}

#[test]
fn it_renders_no_matches_for_a_filter() -> Result<()> {
    let mut app_state = AppState::new(AppStateProps {
        initial_filter: "zzz".to_string(),
        ..Default::default()
    });
    app_state.handle_bookmarks_loaded(vec![bookmark(1, "/work/api", "work")]);

    let screen = draw(&mut app_state)?;
    assert!(screen.contains("No bookmarks match the current filter."));

    return Ok(());
}

#[test]
fn it_renders_the_delete_confirmation() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(AppStateProps::default());
    app_state.handle_bookmarks_loaded(vec![bookmark(1, "/work/api", "work")]);
    app_state.handle_event(
        Event::KeyboardCharInput(Input {
            key: Key::Char('x'),
            ..Default::default()
        }),
        &tx,
    )?;

    let screen = draw(&mut app_state)?;
    assert!(screen.contains("Delete: /work/api?"));
    assert!(screen.contains("Yes"));

    return Ok(());
}

#[test]
fn it_renders_errors_in_the_status_line() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::new(AppStateProps::default());
    app_state.handle_event(Event::ActionFailed("Error opening folder".to_string()), &tx)?;

    let screen = draw(&mut app_state)?;
    assert!(screen.contains("Error opening folder"));

    return Ok(());
}
