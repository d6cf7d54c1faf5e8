//! HTTP request handlers for the Folio API
//!
//! Implements handlers for the 4 REST endpoints: health, search,
//! facets and index rebuild.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::core::error::{FolioError, Result};
use crate::core::services::Services;
use crate::core::types::*;
use crate::http::error::{public_message, status_code};

/// Health check handler
///
/// Returns server status, version and the size of the live corpus
/// when one is loaded.
pub async fn health_handler(State(services): State<Arc<Services>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: services.store.current().ok().map(|c| c.len()),
    })
}

/// Search handler
///
/// Query string: `query` (or `term`), `category`, `tag`, `page`,
/// `limit` (or `pageSize`). Parameters are taken as raw pairs so that
/// bad numbers are coerced instead of rejected.
///
/// # Returns
///
/// - 200 with results, including zero matches
/// - 404 with `error` when no search index was built or loaded
/// - 500 with `error` and no results on internal failure
pub async fn search_handler(
    State(services): State<Arc<Services>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<SearchResponse>) {
    let query = SearchParams::from_pairs(pairs).into_query(&services.config.search);
    search_response(query.page, services.run_query(&query))
}

fn search_response(
    page: usize,
    outcome: Result<SearchResult>,
) -> (StatusCode, Json<SearchResponse>) {
    match outcome {
        Ok(result) => (StatusCode::OK, Json(SearchResponse::from(result))),
        Err(e) => {
            let status = status_code(&e);
            if !e.is_not_found() {
                tracing::error!("Search request failed: {}", e);
            }
            (status, Json(SearchResponse::failure(page, public_message(&e))))
        }
    }
}

/// Facets handler
///
/// Returns category and tag counts for listing pages.
pub async fn facets_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<Facets>> {
    Ok(Json(services.facets()?))
}

/// Index rebuild handler
///
/// Rebuilds the corpus from the configured content directory on a
/// blocking thread, persists it and swaps the live snapshot.
///
/// # Errors
///
/// - `ConfigError`: Invalid exclude pattern in configuration
/// - `StorageError`: The artifact could not be written
pub async fn rebuild_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<BuildStats>> {
    let stats = tokio::task::spawn_blocking(move || services.rebuild())
        .await
        .map_err(|e| FolioError::StorageError(format!("rebuild task failed: {e}")))??;

    Ok(Json(stats))
}
