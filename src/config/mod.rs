//! Configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/gamma-table/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod api;
mod observability;
mod serialization;


pub use api::ApiConfig;
pub use observability::{FileLogging, LogRotation, LoggingConfig};

use crate::table::DEFAULT_PAGE_SIZE;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Symbol loaded when none is given on the command line
pub const DEFAULT_SYMBOL: &str = "SPY";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,

    /// Symbol to load on startup
    pub symbol: String,

    /// Rows per table page (always >= 1)
    pub page_size: usize,

    /// Interactive TUI (false = print the table once and exit)
    pub enable_tui: bool,

    /// Demo mode: synthetic gamma curve instead of the API
    pub demo_mode: bool,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            symbol: DEFAULT_SYMBOL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            enable_tui: true,
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub symbol: Option<String>,
    pub page_size: Option<usize>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Truthy runtime flag values
fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

impl Config {
    /// Get the config file path: ~/.config/gamma-table/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("gamma-table").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists. A file that does not parse is fatal.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `gamma-table config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let base_url = env("GAMMA_TABLE_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api.base_url);

        // API key: env > file
        let api_key = env("GAMMA_TABLE_API_KEY")
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty());

        let timeout_secs = file.timeout_secs.unwrap_or(defaults.api.timeout_secs);

        let symbol = env("GAMMA_TABLE_SYMBOL")
            .or(file.symbol)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.symbol);

        // Page size: env > file > default; zero is not a usable page size
        let page_size = env("GAMMA_TABLE_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.page_size);

        // Runtime flags: env only
        let enable_tui = !env("GAMMA_TABLE_NO_TUI").is_some_and(|v| is_truthy(&v));
        let demo_mode = env("GAMMA_TABLE_DEMO").is_some_and(|v| is_truthy(&v));

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api: ApiConfig {
                base_url,
                api_key,
                timeout_secs,
            },
            symbol,
            page_size,
            enable_tui,
            demo_mode,
            logging,
        }
    }
}
