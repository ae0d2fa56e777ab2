//! Clipboard helper for copying the visible page
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened fresh
//! for each copy so no handle is held between key presses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Fails when there is no display server (headless Linux) or access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}
