// HTTP API handlers
//
// JSON endpoints backing the web page, plus the page itself and the CSV
// download. Handlers only read the catalog and talk to the selection session;
// none of them hold selection state.

use super::error::ApiError;
use super::WebState;
use crate::catalog::LocalityRecord;
use crate::export::{CsvDocument, CSV_MIME};
use crate::selection::{Focus, Origin, SelectionState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

/// Single-page view (Leaflet map, selector, list, detail panel)
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Body of `POST /api/selection`
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub id: String,
}

/// Response of `GET /api/map`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    /// Focus used while nothing is selected
    pub center: Focus,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/localities - whole catalog in display order
pub async fn list_localities(State(state): State<WebState>) -> Json<Vec<LocalityRecord>> {
    Json(state.catalog.records().to_vec())
}

/// GET /api/localities/:id
pub async fn get_locality(
    State(state): State<WebState>,
    Path(id): Path<String>,
) -> Result<Json<LocalityRecord>, ApiError> {
    state
        .catalog
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown locality id: {}", id)))
}

/// GET /api/selection
pub async fn get_selection(State(state): State<WebState>) -> Json<SelectionState> {
    Json(state.session.current())
}

/// POST /api/selection - pick a locality
///
/// Unknown ids are not an error: the response carries the unchanged state.
pub async fn post_selection(
    State(state): State<WebState>,
    body: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Json<SelectionState>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .session
        .select(request.id, Origin::Web)
        .await
        .map(Json)
        .map_err(|e| ApiError::Internal(format!("{:#}", e)))
}

/// GET /api/map
pub async fn get_map(State(state): State<WebState>) -> Json<MapSettings> {
    Json(MapSettings {
        center: state.map.default_focus(),
        zoom: state.map.zoom,
        tile_url: state.map.tile_url.clone(),
        attribution: state.map.attribution.clone(),
    })
}

/// GET /api/export - full catalog as a CSV download
pub async fn export_csv(State(state): State<WebState>) -> impl IntoResponse {
    let doc = CsvDocument::build(
        state.catalog.records(),
        state.export.header,
        &state.export.filename,
    );
    tracing::info!(
        filename = %doc.filename,
        records = state.catalog.len(),
        "Serving catalog export"
    );

    (
        [
            (header::CONTENT_TYPE, CSV_MIME.to_string()),
            (header::CONTENT_DISPOSITION, doc.content_disposition()),
        ],
        doc.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::{ExportConfig, MapConfig};
    use crate::export::HeaderStyle;
    use crate::selection::{SelectionController, SessionHandle};
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn web_state() -> WebState {
        let catalog = Arc::new(Catalog::load());
        let map = MapConfig::default();
        let (session, _task) = SessionHandle::spawn(SelectionController::new(
            catalog.clone(),
            map.default_focus(),
        ));
        WebState::new(catalog, session, map, ExportConfig::default())
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn lists_catalog_in_order() {
        let Json(records) = list_localities(State(web_state())).await;
        assert_eq!(records.len(), 15);
        assert_eq!(records[0].name, "Aghione");
        assert_eq!(records[14].name, "Serra-di-Fiumorbo");
    }

    #[tokio::test]
    async fn unknown_locality_is_not_found() {
        let err = get_locality(State(web_state()), Path("9Z999".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn known_locality_is_returned() {
        let Json(record) = get_locality(State(web_state()), Path("2B096".to_string()))
            .await
            .unwrap();
        assert_eq!(record.name, "Corte");
    }

    #[tokio::test]
    async fn posting_selection_moves_focus() {
        let state = web_state();
        let Json(selection) = post_selection(
            State(state.clone()),
            Ok(Json(SelectRequest {
                id: "2B033".to_string(),
            })),
        )
        .await
        .unwrap();
        assert_eq!(selection.focus, Focus::new(42.697283, 9.450881));

        let Json(current) = get_selection(State(state)).await;
        assert_eq!(current.selected_id(), Some("2B033"));
    }

    #[tokio::test]
    async fn posting_unknown_id_returns_unchanged_state() {
        let state = web_state();
        let Json(selection) = post_selection(
            State(state),
            Ok(Json(SelectRequest {
                id: "9Z999".to_string(),
            })),
        )
        .await
        .unwrap();
        assert!(selection.selected.is_none());
        assert_eq!(selection.focus, Focus::REGIONAL_CENTROID);
    }

    #[tokio::test]
    async fn map_settings_expose_default_center() {
        let Json(settings) = get_map(State(web_state())).await;
        assert_eq!(settings.center, Focus::REGIONAL_CENTROID);
        assert_eq!(settings.zoom, 10);
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json["tileUrl"].as_str().unwrap().contains("openstreetmap"));
    }

    #[tokio::test]
    async fn export_is_a_csv_download() {
        let response = export_csv(State(web_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"communes_haute_corse.csv\""
        );

        let body = body_text(response).await;
        let lines: Vec<_> = body.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[1].starts_with("2B002,Aghione,"));
    }

    #[tokio::test]
    async fn export_respects_label_header() {
        let mut state = web_state();
        state.export = Arc::new(ExportConfig {
            header: HeaderStyle::Labels,
            ..ExportConfig::default()
        });
        let body = body_text(export_csv(State(state)).await.into_response()).await;
        assert!(body.starts_with("Code INSEE,Nom,"));
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let Html(page) = index().await;
        assert!(page.contains("Communes de Haute-Corse"));
        assert!(page.contains("/api/export"));
    }

    #[tokio::test]
    async fn page_resyncs_selector_before_skipping_unchanged_state() {
        let Html(page) = index().await;
        let body = &page[page.find("function render(state)").unwrap()..];
        let resync = body.find("selector.value = selected ? selected.id : ''").unwrap();
        let skip = body.find("if (key === lastKey) return;").unwrap();
        assert!(resync < skip);
    }
}
