//! `[logging]` section: filter level and the optional JSON log file

use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

/// How often the JSON log file starts a new file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    /// Unknown names (e.g. "weekly") fall back to daily
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }

    /// Matching `tracing-appender` schedule
    pub fn rotation(&self) -> Rotation {
        match self {
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for this crate's events; RUST_LOG replaces the whole filter
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// Files are named `<prefix>.<date>`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "commune-atlas".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let FileLogging {
            level,
            file_enabled,
            file_dir,
            file_rotation,
            file_prefix,
        } = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: level
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(defaults.level),
            file_enabled: file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_dir.map(PathBuf::from).unwrap_or(defaults.file_dir),
            file_rotation: file_rotation
                .as_deref()
                .map(LogRotation::from_str)
                .unwrap_or(defaults.file_rotation),
            file_prefix: file_prefix.unwrap_or(defaults.file_prefix),
        }
    }

    /// Filter used when RUST_LOG is unset
    pub fn filter_directive(&self) -> String {
        format!("commune_atlas={},axum=info", self.level)
    }
}
