// TUI module - Terminal User Interface
//
// Sets up the terminal, runs the event loop, and restores the terminal on
// exit. The loop multiplexes three sources with tokio::select!:
// - Keyboard input (mapped to actions in `input`)
// - Timer ticks (spinner, toast expiry)
// - Completed fetches from background tasks

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod theme;
pub mod ui;

use crate::api::{ApiError, DealerGammaResponse};
use crate::source::GammaSource;
use anyhow::{Context, Result};
use app::{App, Effect};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

type FetchResult = Result<DealerGammaResponse, ApiError>;

/// Run the TUI until the user quits
pub async fn run_tui(mut app: App, source: GammaSource) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &source).await;

    // Restore terminal even if the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    source: &GammaSource,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchResult>(1);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        if let Some(action) = input::action_for(&key_event) {
                            if let Some(effect) = app.handle(action) {
                                perform(app, effect, source, &fetch_tx);
                            }
                        }
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(result) = fetch_rx.recv() => {
                app.finish_fetch(result);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn perform(
    app: &mut App,
    effect: Effect,
    source: &GammaSource,
    fetch_tx: &mpsc::Sender<FetchResult>,
) {
    match effect {
        Effect::Fetch(symbol) => {
            tracing::info!("Refreshing {} from {}", symbol, source.label());
            let source = source.clone();
            let tx = fetch_tx.clone();
            tokio::spawn(async move {
                let result = source.fetch(&symbol).await;
                let _ = tx.send(result).await;
            });
        }
        Effect::Copy(tsv) => {
            let rows = tsv.lines().count().saturating_sub(1);
            match clipboard::copy_to_clipboard(&tsv) {
                Ok(()) => app.show_toast(format!("Copied {} rows", rows)),
                Err(e) => {
                    tracing::warn!("Clipboard copy failed: {:#}", e);
                    app.show_toast("Copy failed");
                }
            }
        }
    }
}
