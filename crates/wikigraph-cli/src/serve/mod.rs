//! Local web server exposing the knowledge graph as JSON.
//!
//! Every request builds a fresh graph for the identity named in the request
//! headers; nothing is cached between requests.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types

mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use color_eyre::eyre::{eyre, WrapErr};
use tower_http::cors::{Any, CorsLayer};

use wikigraph_core::{Config, GraphBuilder};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Graph builder over the configured corpus and authority.
    pub builder: GraphBuilder,
    /// Upper bound for one graph build.
    pub request_timeout: Duration,
}

/// Build the router with all API endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/graph", get(handlers::api_graph))
        .route("/api/health", get(handlers::api_health))
        // CORS for the renderer, which may be served from the wiki host
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Start the graph server.
pub async fn start_server(config: &Config) -> color_eyre::Result<()> {
    let builder = GraphBuilder::from_config(config).wrap_err("failed to set up graph builder")?;

    let state = Arc::new(AppState {
        builder,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| eyre!("invalid bind address {}:{}: {}", config.server.host, config.server.port, e))?;
    let url = format!("http://{}/api/graph", addr);

    tracing::info!(%addr, data_dir = %config.corpus.data_dir, "starting graph server");
    eprintln!("Graph endpoint: {}", url);
    eprintln!("Press Ctrl+C to stop\n");

    if config.server.open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
