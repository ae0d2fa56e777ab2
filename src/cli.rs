// CLI module - command-line argument parsing and handlers
//
// The default invocation shows a symbol's dealer gamma table. The `config`
// subcommand manages the config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --path: Print config file path

use crate::config::{Config, VERSION};
use crate::table::TableEvent;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Dealer gamma table viewer
#[derive(Parser, Debug)]
#[command(name = "gamma-table")]
#[command(version = VERSION)]
#[command(about = "Sortable, paginated dealer gamma table", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Symbol to load (defaults to the configured symbol)
    pub symbol: Option<String>,

    /// Rows per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Initial sort column key (e.g. strike, gamma, zerogex)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Initial page (clamped to the available pages)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Print the table once instead of starting the TUI
    #[arg(long)]
    pub plain: bool,

    /// Use a synthetic gamma curve instead of the API
    #[arg(long)]
    pub demo: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of env/file configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(symbol) = &self.symbol {
            config.symbol = symbol.to_uppercase();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = usize::try_from(page_size).unwrap_or(usize::MAX);
        }
        if self.plain {
            config.enable_tui = false;
        }
        if self.demo {
            config.demo_mode = true;
        }
    }

    /// Table events that reproduce the requested initial sort and page
    pub fn initial_events(&self) -> Vec<TableEvent> {
        let mut events = Vec::new();
        if let Some(key) = &self.sort {
            events.push(TableEvent::Sort(key.clone()));
            if self.desc {
                events.push(TableEvent::Sort(key.clone()));
            }
        }
        if self.page != 1 {
            events.push(TableEvent::GoToPage(self.page));
        }
        events
    }
}

/// Handle the `config` subcommand. Returns true if it ran (exit after).
pub fn handle_config_command(cli: &Cli) -> bool {
    let Some(Commands::Config {
        show,
        reset,
        edit,
        path,
    }) = &cli.command
    else {
        return false;
    };

    if *path {
        handle_config_path();
    } else if *show {
        handle_config_show();
    } else if *reset {
        handle_config_reset();
    } else if *edit {
        handle_config_edit();
    } else {
        println!("Usage: gamma-table config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
    true
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("api_url = {:?}", config.api.base_url);
    match config.api.key_fingerprint() {
        Some(fingerprint) => println!("api_key = <set, sha256 {}>", fingerprint),
        None => println!("api_key = <unset>"),
    }
    println!("timeout_secs = {}", config.api.timeout_secs);
    println!("symbol = {:?}", config.symbol);
    println!("page_size = {}", config.page_size);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            eprintln!("Editor exited with status: {}", status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gamma-table").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn symbol_and_overrides_apply() {
        let cli = parse(&["qqq", "--page-size", "25", "--plain"]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.symbol, "QQQ");
        assert_eq!(config.page_size, 25);
        assert!(!config.enable_tui);
        assert!(!config.demo_mode);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = Cli::try_parse_from(["gamma-table", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn desc_requires_sort() {
        assert!(Cli::try_parse_from(["gamma-table", "--desc"]).is_err());
    }

    #[test]
    fn initial_events_encode_sort_and_page() {
        let cli = parse(&["--sort", "strike", "--desc", "--page", "3"]);
        assert_eq!(
            cli.initial_events(),
            vec![
                TableEvent::Sort("strike".into()),
                TableEvent::Sort("strike".into()),
                TableEvent::GoToPage(3),
            ]
        );
        assert!(parse(&[]).initial_events().is_empty());
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = parse(&["config", "--path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config { path: true, .. })
        ));
        assert!(cli.symbol.is_none());
    }
}
