//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to a commented TOML document
    ///
    /// The API key is never written; it is left as a commented placeholder.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# gamma-table configuration
# Environment variables override these values (GAMMA_TABLE_API_URL,
# GAMMA_TABLE_API_KEY, GAMMA_TABLE_SYMBOL, GAMMA_TABLE_PAGE_SIZE).

# Market data API base URL
api_url = "{api_url}"

# Bearer token for the API (prefer GAMMA_TABLE_API_KEY)
# api_key = ""

# Request timeout in seconds
timeout_secs = {timeout_secs}

# Symbol loaded on startup
symbol = "{symbol}"

# Rows per table page
page_size = {page_size}

[logging]
level = "{level}"               # trace, debug, info, warn, error (RUST_LOG overrides)
file_enabled = {file_enabled}   # JSON log files in addition to the TUI/stderr output
file_dir = "{file_dir}"
file_rotation = "{file_rotation}"   # hourly, daily, never
file_prefix = "{file_prefix}"
"#,
            api_url = self.api.base_url,
            timeout_secs = self.api.timeout_secs,
            symbol = self.symbol,
            page_size = self.page_size,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}
