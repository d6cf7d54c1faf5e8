//! HTTP REST adapter
//!
//! Depends only on core/. Exposes search, facets, health and index
//! rebuild endpoints via the Axum web framework.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

pub use handlers::*;

/// Build the API router over shared services
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_handler))
        // API endpoints
        .route("/api/search", get(handlers::search_handler))
        .route("/api/facets", get(handlers::facets_handler))
        .route("/api/index", post(handlers::rebuild_handler))
        // Add middleware
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        // Add shared state
        .with_state(services)
}
