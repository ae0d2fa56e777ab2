// gamma-table - dealer gamma curves as a sortable, paginated table
//
// Fetches a symbol's dealer gamma curve from the market data API (or builds a
// synthetic one in demo mode), flattens it into table records and shows it
// either in an interactive terminal UI or as a plain-text grid.
//
// Architecture:
// - Table (table/): columns, comparator, sort/page transitions, projection
// - API (api/): HTTP client and the dealer gamma endpoint
// - TUI (ratatui): renders the table and maps keys onto table events
// - Config: env > ~/.config/gamma-table/config.toml > defaults

mod api;
mod cli;
mod config;
mod demo;
mod logging;
mod source;
mod table;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use logging::LogBuffer;
use source::{empty_gamma_table, gamma_table, GammaSource};
use table::{TableState, TableView};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle `config` subcommand first; exit early if it ran
    if cli::handle_config_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.apply_to(&mut config);

    // TUI mode captures logs in a buffer so they don't garble the display.
    // The guard flushes file logs on drop and must live until exit.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, config.enable_tui, &log_buffer);

    let source = GammaSource::from_config(&config).context("Failed to create API client")?;
    tracing::info!("Loading {} from {}", config.symbol, source.label());

    let props = match source.fetch(&config.symbol).await {
        Ok(response) => gamma_table(&response, config.page_size)?,
        // The TUI can retry with `r`, so start it empty instead of exiting
        Err(e) if config.enable_tui => {
            tracing::error!("Failed to load {}: {}", config.symbol, e);
            empty_gamma_table(&config.symbol, config.page_size)?
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to load dealer gamma for {}", config.symbol));
        }
    };

    if let Some(key) = &cli.sort {
        if props.columns.sortable(key).is_none() {
            tracing::warn!("Ignoring --sort {}: not a sortable column", key);
        }
    }

    let mut state = TableState::new();
    for event in cli.initial_events() {
        state.update(&event, &props);
    }

    if config.enable_tui {
        tracing::info!("Starting TUI");
        let app = tui::app::App::new(
            config.symbol.clone(),
            source.label(),
            props,
            state,
            log_buffer,
        );
        if let Err(e) = tui::run_tui(app, source).await {
            tracing::error!("TUI error: {:?}", e);
            return Err(e);
        }
    } else {
        print!("{}", TableView::project(&props, &state).to_text());
    }

    Ok(())
}
