//! Clipboard helper for copying the CSV export
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened per call
//! so no handle is held between copies.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Fails when no display server is available (headless Linux) or access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")
}
