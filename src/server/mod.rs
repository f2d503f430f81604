//! Web view server setup
//!
//! Serves the single-page map view and its JSON API. The server is one of the
//! display surfaces: it reads the catalog and forwards picks to the selection
//! session, which stays the single owner of the selection state.

pub mod api;
mod error;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;

use crate::catalog::Catalog;
use crate::config::{Config, ExportConfig, MapConfig};
use crate::selection::SessionHandle;

/// Shared state for the web server
#[derive(Clone)]
pub struct WebState {
    catalog: Arc<Catalog>,
    session: SessionHandle,
    map: Arc<MapConfig>,
    export: Arc<ExportConfig>,
}

impl WebState {
    pub fn new(
        catalog: Arc<Catalog>,
        session: SessionHandle,
        map: MapConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            catalog,
            session,
            map: Arc::new(map),
            export: Arc::new(export),
        }
    }
}

/// Build the router with every route of the web view
pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/api/localities", get(api::list_localities))
        .route("/api/localities/:id", get(api::get_locality))
        .route(
            "/api/selection",
            get(api::get_selection).post(api::post_selection),
        )
        .route("/api/map", get(api::get_map))
        .route("/api/export", get(api::export_csv))
        .with_state(state)
}

/// Start the web server and serve until `shutdown_rx` fires
pub async fn start_server(
    config: Config,
    catalog: Arc<Catalog>,
    session: SessionHandle,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let bind_addr = config.bind_addr;
    let state = WebState::new(catalog, session, config.map, config.export);
    let app = router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", bind_addr))?;

    tracing::info!("Web view listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Web server shut down gracefully");
    Ok(())
}
