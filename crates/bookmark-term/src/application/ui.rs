use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Tabs;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::styles;
use crate::domain::models::Action;
use crate::domain::models::Choice;
use crate::domain::models::Event;
use crate::domain::models::Mode;
use crate::domain::models::StatusKind;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;

#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

/// Restores the terminal so a panic message is readable.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state_props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events_service = EventsService::new(rx);
    let mut app_state = AppState::new(app_state_props);

    loop {
        terminal.draw(|frame| render(frame, &mut app_state))?;

        let event = events_service.next().await?;
        if app_state.handle_event(event, &tx)? {
            break;
        }
    }

    return Ok(());
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    return Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
}

fn help_text(mode: &Mode, has_cwd_file: bool) -> &'static str {
    match mode {
        Mode::Filtering => return "type to filter • enter apply • esc done",
        Mode::Confirming(_) => return "y yes • n no • ←/→ choose • enter confirm",
        Mode::Editing(_) => return "enter save • esc cancel",
        Mode::Browsing => {
            if has_cwd_file {
                return "↑/↓ move • tab category • / filter • enter cd • o open • e edit • x delete • q quit";
            }

            return "↑/↓ move • tab category • / filter • enter open • e edit • x delete • q quit";
        }
    }
}

pub fn render(frame: &mut Frame, app_state: &mut AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, app_state, layout[0]);
    render_filter(frame, app_state, layout[1]);
    render_list(frame, app_state, layout[2]);
    render_status(frame, app_state, layout[3]);

    let help = Paragraph::new(help_text(&app_state.mode, app_state.cwd_file.is_some()))
        .style(styles::subtle());
    frame.render_widget(help, layout[4]);

    match &mut app_state.mode {
        Mode::Confirming(dialog) => {
            let area = centered_rect(60, 5, frame.area());
            let button = |label: &'static str, choice: Choice| {
                if dialog.choice == choice {
                    return Span::styled(format!(" {label} "), styles::selected());
                }
                return Span::styled(format!(" {label} "), styles::muted());
            };
            let buttons = Line::from(vec![
                button("No", Choice::No),
                Span::raw("   "),
                button("Yes", Choice::Yes),
            ]);

            let popup = Paragraph::new(vec![Line::default(), buttons])
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(styles::border(true))
                        .title(Span::styled(dialog.title(), styles::title())),
                );

            frame.render_widget(Clear, area);
            frame.render_widget(popup, area);
        }
        Mode::Editing(editor) => {
            let area = centered_rect(60, 3, frame.area());
            editor.textarea.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(styles::border(true))
                    .title(Span::styled(
                        format!("Category: {}", editor.bookmark.folder),
                        styles::title(),
                    )),
            );

            frame.render_widget(Clear, area);
            frame.render_widget(&editor.textarea, area);
        }
        _ => {}
    }
}

fn render_tabs(frame: &mut Frame, app_state: &AppState, area: Rect) {
    let titles = app_state
        .tabs
        .iter()
        .map(|tab| return tab.label().to_string())
        .collect::<Vec<String>>();
    let selected = app_state
        .tabs
        .iter()
        .position(|tab| return tab == &app_state.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(styles::muted())
        .highlight_style(styles::selected())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border(false))
                .title(Span::styled("Bookmarks", styles::title())),
        );

    frame.render_widget(tabs, area);
}

fn render_filter(frame: &mut Frame, app_state: &mut AppState, area: Rect) {
    let focused = app_state.mode.is_filtering();
    app_state.filter.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border(focused))
            .title("Filter"),
    );

    frame.render_widget(&app_state.filter, area);
}

fn render_list(frame: &mut Frame, app_state: &mut AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border(app_state.mode.is_browsing()))
        .title(format!(
            "{} ({})",
            app_state.active_tab.label(),
            app_state.visible.len()
        ));
    app_state.set_rect(block.inner(area));

    if app_state.visible.is_empty() {
        let text = if !app_state.loaded {
            "Loading bookmarks..."
        } else if app_state.bookmarks.is_empty() {
            "No bookmarks yet. Run `bookmark-manager add` inside a folder."
        } else {
            "No bookmarks match the current filter."
        };

        let paragraph = Paragraph::new(text).style(styles::muted()).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items = app_state
        .visible
        .iter()
        .map(|bookmark| {
            return ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", bookmark.category.label()),
                    styles::category_badge(&bookmark.category),
                ),
                Span::raw(" "),
                Span::raw(bookmark.folder.clone()),
                Span::raw("  "),
                Span::styled(
                    bookmark.date_created.format("%Y-%m-%d").to_string(),
                    styles::subtle(),
                ),
            ]));
        })
        .collect::<Vec<ListItem>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected())
        .highlight_symbol("› ");

    frame.render_stateful_widget(list, area, &mut app_state.list_state);
}

fn render_status(frame: &mut Frame, app_state: &AppState, area: Rect) {
    let Some(status) = &app_state.status else {
        return;
    };

    let style = match status.kind {
        StatusKind::Info => ratatui::style::Style::default().fg(styles::SUCCESS),
        StatusKind::Error => ratatui::style::Style::default().fg(styles::ERROR),
    };

    frame.render_widget(Paragraph::new(status.text.as_str()).style(style), area);
}
