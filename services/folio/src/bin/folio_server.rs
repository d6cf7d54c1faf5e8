//! Folio HTTP server entry point
//!
//! Loads (or builds) the search index and serves the search API.

use std::sync::Arc;

use folio::core::config::Config;
use folio::core::logging::{init_tracing, SERVER_DEFAULT_FILTER};
use folio::core::services::Services;
use folio::core::xdg::XdgDirs;
use folio::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(SERVER_DEFAULT_FILTER, false);

    tracing::info!("Starting Folio search service");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load()?;
    config.log_config();

    let services = Services::new(config.clone());

    // The server still starts without an index; searches answer 404
    // until one is built through POST /api/index.
    match services.load_or_build(config.server.build_on_start) {
        Ok(count) => tracing::info!("Search index ready with {} posts", count),
        Err(e) => tracing::warn!("Search index unavailable: {}", e),
    }

    let app = http::router(Arc::new(services));

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
