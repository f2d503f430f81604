// Startup module - displays banner and runtime summary
//
// Printed before the TUI takes over the screen (or in headless mode), and
// mirrored into the log so the TUI's System Logs panel shows it too.

use crate::catalog::Catalog;
use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// A view the process runs, for display
struct SurfaceStatus {
    name: &'static str,
    enabled: bool,
    description: &'static str,
}

fn surfaces(config: &Config) -> [SurfaceStatus; 3] {
    [
        SurfaceStatus {
            name: "web",
            enabled: true,
            description: "Leaflet map and export",
        },
        SurfaceStatus {
            name: "tui",
            enabled: config.enable_tui,
            description: "Terminal list and map",
        },
        SurfaceStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: "JSON log files",
        },
    ]
}

/// Print the startup banner
pub fn print_startup(config: &Config, catalog: &Catalog) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}Commune Atlas{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Communes de Haute-Corse{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!(
        "  {DIM}Catalog:{RESET} {BOLD}{}{RESET} localities",
        catalog.len()
    );
    println!(
        "  {DIM}Exports:{RESET} {}",
        config.export.dir.display()
    );
    println!();

    for surface in surfaces(config) {
        print_surface_status(&surface);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Web view on {BOLD}{}{RESET}",
        config.web_url()
    );
    if !config.enable_tui {
        println!("  {YELLOW}▸{RESET} {YELLOW}Headless{RESET} {DIM}(Ctrl+C to stop){RESET}");
    }
    println!();
}

fn print_surface_status(surface: &SurfaceStatus) {
    use colors::*;

    let (icon, style) = if surface.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<10}{RESET} {DIM}{}{RESET}",
        surface.name, surface.description
    );
}

/// Log the same summary, for the TUI log panel and log files
pub fn log_startup(config: &Config, catalog: &Catalog) {
    tracing::info!("Commune Atlas v{}", VERSION);
    tracing::info!("Catalog loaded: {} localities", catalog.len());

    for surface in surfaces(config) {
        let icon = if surface.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, surface.name, surface.description);
    }

    tracing::info!("▸ Web view on {}", config.web_url());
    tracing::info!("▸ Exports go to {}", config.export.dir.display());
}
