//! API error types and response handling

use axum::{http::StatusCode, response::IntoResponse};

/// API error responses
/// Converted to HTTP status codes via IntoResponse
#[derive(Debug)]
pub enum ApiError {
    Internal(String),
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        if status.is_server_error() {
            tracing::error!("API error: {} - {}", status, message);
        } else {
            tracing::debug!("API error: {} - {}", status, message);
        }

        (status, message).into_response()
    }
}
