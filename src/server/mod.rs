// src/server/mod.rs
// =============================================================================
// The HTTP service behind `repo-analyzer serve`.
//
// Routes:
// - GET /analyze  -> run one analysis (see handlers.rs)
// - GET /health   -> "ok"
//
// The Analyzer is shared between requests behind an Arc. It holds only
// HTTP clients and settings; every request walks with its own state.
// =============================================================================

mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::analyze::Analyzer;

/// Builds the router with all routes attached
pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/analyze", get(handlers::analyze))
        .route("/health", get(handlers::health))
        .with_state(analyzer)
}

/// Binds `bind` and serves until the process is stopped
pub async fn serve(bind: &str, analyzer: Analyzer) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    let local_addr = listener.local_addr()?;

    info!("Serving on http://{}", local_addr);
    info!("Try: curl 'http://{}/analyze?repo=octocat/Hello-World&format=prompt'", local_addr);

    axum::serve(listener, router(Arc::new(analyzer))).await?;
    Ok(())
}
