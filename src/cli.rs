// CLI module - command-line argument parsing and handlers
//
// Provides subcommands that run without starting the web or terminal view:
// - config --show: Display effective configuration
// - config --path: Print the config file location
// - config --reset: Regenerate config file with defaults
// - list: Print the catalog in display order
// - export: Write the catalog CSV to a file or stdout

use crate::catalog::Catalog;
use crate::config::{Config, VERSION};
use crate::export::{export_csv_with, write_export, CsvDocument, HeaderStyle};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Commune Atlas - browse and export the communes of Haute-Corse
#[derive(Parser)]
#[command(name = "commune-atlas")]
#[command(version = VERSION)]
#[command(about = "Browse, map and export the communes of Haute-Corse", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// List the communes in display order
    List,

    /// Export the catalog as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use French column labels in the header row
        #[arg(long)]
        labels: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                // No flag provided, show help
                println!("Usage: commune-atlas config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        Some(Commands::List) => {
            print!("{}", render_list(&Catalog::load()));
            true
        }
        Some(Commands::Export { output, labels }) => {
            handle_export(output, labels);
            true
        }
        None => false, // No subcommand, run the views
    }
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
    print!("{}", config.to_toml());

    // Show source info
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

    // Confirm if file exists
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

    // Write the default config (using Config's single source of truth)
    if let Err(e) = Config::default().save() {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_export(output: Option<PathBuf>, labels: bool) {
    let config = Config::from_env();
    let header = if labels {
        HeaderStyle::Labels
    } else {
        config.export.header
    };

    let catalog = Catalog::load();

    match output {
        Some(path) => match export_to_file(&catalog, header, &path) {
            Ok(written) => {
                eprintln!("Wrote {} communes to {}", catalog.len(), written.display())
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        },
        None => println!("{}", export_csv_with(catalog.records(), header)),
    }
}

/// Write the catalog CSV to `path`, creating its parent directory
fn export_to_file(catalog: &Catalog, header: HeaderStyle, path: &Path) -> Result<PathBuf> {
    let filename = path
        .file_name()
        .with_context(|| format!("Output path {} has no file name", path.display()))?
        .to_string_lossy();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let doc = CsvDocument::build(catalog.records(), header, &filename);
    write_export(dir, &doc)
}

/// One aligned row per record: id, name, founded year, coordinates
fn render_list(catalog: &Catalog) -> String {
    let width = catalog
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for r in catalog {
        let padding = " ".repeat(width - r.name.chars().count());
        out.push_str(&format!(
            "{}  {}{}  {}  {:.6}, {:.6}\n",
            r.id, r.name, padding, r.founded_year, r.latitude, r.longitude
        ));
    }
    out
}
