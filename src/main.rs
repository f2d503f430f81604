// Commune Atlas - communes of Haute-Corse, listed, mapped and exported
//
// The catalog is compiled in and read-only. A single selection is owned by a
// session task; the web view and the terminal view both send picks to it and
// render whatever it publishes.
//
// Architecture:
// - Catalog: sorted, indexed fixture of localities
// - Selection session (tokio task): applies picks, publishes state on a watch channel
// - Web view (axum): Leaflet page, JSON API, CSV download
// - TUI (ratatui): list, braille map, detail panel, export to file or clipboard
// - CLI (clap): config management, list and export without starting the views

mod catalog;
mod cli;
mod config;
mod export;
mod logging;
mod selection;
mod server;
mod startup;
mod tui;

use anyhow::Result;
use catalog::Catalog;
use config::Config;
use logging::LogBuffer;
use selection::{SelectionController, SessionHandle};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config, list, export)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // In TUI mode logs go to this buffer instead of garbling the display
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config, &log_buffer);

    let catalog = Arc::new(Catalog::load());

    let controller = SelectionController::new(catalog.clone(), config.map.default_focus());
    let (session, session_task) = SessionHandle::spawn(controller);

    // Create shutdown channel for graceful server shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let server_handle = {
        let config = config.clone();
        let catalog = catalog.clone();
        let session = session.clone();
        tokio::spawn(async move {
            if let Err(e) = server::start_server(config, catalog, session, shutdown_rx).await {
                tracing::error!("Web server error: {:#}", e);
            }
        })
    };

    startup::print_startup(&config, &catalog);
    startup::log_startup(&config, &catalog);

    if config.enable_tui {
        if let Err(e) =
            tui::run_tui(config.clone(), catalog.clone(), session.clone(), log_buffer).await
        {
            eprintln!("TUI error: {:#}", e);
        }
    } else {
        // Headless: serve until Ctrl+C
        tokio::signal::ctrl_c().await?;
        tracing::info!("Received Ctrl+C, shutting down...");
    }

    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    // Dropping the last handle ends the session loop
    drop(session);
    let _ = session_task.await;

    Ok(())
}
