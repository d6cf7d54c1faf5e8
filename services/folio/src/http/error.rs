//! HTTP status mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::FolioError;

/// Status code for an error surfaced over HTTP
pub fn status_code(err: &FolioError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_bad_request() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Client-facing message; internal details stay in the logs
pub fn public_message(err: &FolioError) -> String {
    match err {
        FolioError::IndexNotFound(_) => "search index not found".to_string(),
        FolioError::SearchFailed(_) => "search failed".to_string(),
        FolioError::IoError(_) | FolioError::SerdeError(_) | FolioError::StorageError(_) => {
            "storage error".to_string()
        }
        other => other.message(),
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for FolioError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": public_message(&self),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
