//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::export::{HeaderStyle, DEFAULT_FILENAME};

/// CSV export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Filename offered for download and used for files written by the TUI
    pub filename: String,
    pub header: HeaderStyle,
    /// Directory the TUI writes exports into
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            header: HeaderStyle::Fields,
            dir: PathBuf::from("./exports"),
        }
    }
}

/// Export settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileExport {
    pub filename: Option<String>,
    pub header: Option<String>,
    pub dir: Option<String>,
}

impl ExportConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileExport>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            filename: file
                .filename
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.filename),
            header: file
                .header
                .map(|s| HeaderStyle::from_str(&s))
                .unwrap_or(defaults.header),
            dir: file.dir.map(PathBuf::from).unwrap_or(defaults.dir),
        }
    }
}
