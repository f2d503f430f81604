//! Application configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/commune-atlas/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod export;
mod logs;
mod map;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use export::{ExportConfig, FileExport};
pub use map::{FileMap, MapConfig};
pub use logs::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND: &str = "127.0.0.1:8090";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the web view listens on
    pub bind_addr: SocketAddr,

    /// Whether to run the terminal view (disable for headless mode)
    pub enable_tui: bool,

    pub map: MapConfig,

    pub export: ExportConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8090)),
            enable_tui: true,
            map: MapConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,

    /// Optional [map] section
    pub map: Option<FileMap>,

    /// Optional [export] section
    pub export: Option<FileExport>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/commune-atlas/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("commune-atlas").join("config.toml"))
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

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is fatal:
    /// the process exits with a message pointing at the file.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Numbers written as strings (zoom, center_lat)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `commune-atlas config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        match Self::resolve(file, |key| std::env::var(key).ok()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\n  CONFIG ERROR: {:#}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Merge file settings with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Bind address: env > file > default
        let bind_raw = env("ATLAS_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse()
            .with_context(|| format!("Invalid bind address {:?}", bind_raw))?;

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("ATLAS_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let map = MapConfig::from_file(file.map);

        // Export directory: env > file > default
        let mut export = ExportConfig::from_file(file.export);
        if let Some(dir) = env("ATLAS_EXPORT_DIR") {
            export.dir = PathBuf::from(dir);
        }

        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            bind_addr,
            enable_tui,
            map,
            export,
            logging,
        })
    }

    /// Base URL of the web view
    pub fn web_url(&self) -> String {
        format!("http://{}", self.bind_addr)
    }
}
