use anyhow::Result;
use std::io;
use tokio::sync::mpsc;
use tokio::task;

use bookmark_core::App;
use bookmark_core::Folders;
use bookmark_term::{destruct_terminal_for_panic, start_loop};
use bookmark_term::{Action, ActionsService, AppStateProps, Event};
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

type BrowserTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<BrowserTerminal> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut BrowserTerminal) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    Ok(())
}

async fn start_ui(
    props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = start_loop(&mut terminal, props, tx, rx).await;
    restore_terminal(&mut terminal)?;

    result
}

/// Runs the interactive browser until the user quits.
pub async fn run(app: App, props: AppStateProps) -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    let store = app.into_store();
    background_futures.spawn(async move {
        ActionsService::start(store, Folders::default(), event_tx, &mut action_rx).await
    });

    let ui_future = start_ui(props, action_tx, event_rx);

    let result = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if result.is_err() {
        destruct_terminal_for_panic();
    }

    result
}
