//! HTTP route handlers for the graph server.
//!
//! Handlers are kept thin; graph construction lives in `wikigraph-core`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use wikigraph_core::graph::export;
use wikigraph_core::GraphError;

use super::models::{identity_from_headers, ErrorResponse, HealthResponse};
use super::AppState;

/// GET `/api/graph` - Build and return the graph visible to the caller.
///
/// Response format:
/// ```json
/// {
///   "nodes": [{"id": "...", "name": "...", "namespace": "...", "weight": 1, "tags": []}],
///   "edges": [{"source": "...", "target": "...", "weight": 1, "type": "reference"}],
///   "namespaces": [],
///   "tags": []
/// }
/// ```
pub async fn api_graph(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let identity = identity_from_headers(&headers);

    // Dropping the build future on timeout abandons outstanding reads
    let built = tokio::time::timeout(state.request_timeout, state.builder.build(&identity)).await;

    let graph = match built {
        Ok(Ok(graph)) => graph,
        Ok(Err(e)) => {
            tracing::error!(identity = identity.label(), error = %e, "graph build failed");
            return error_response(status_for(&e), e.to_string());
        }
        Err(_) => {
            tracing::warn!(identity = identity.label(), "graph build timed out");
            return error_response(StatusCode::GATEWAY_TIMEOUT, "graph build timed out".into());
        }
    };

    match export::to_json(&graph) {
        Ok(body) => ([(header::CONTENT_TYPE, export::CONTENT_TYPE)], body).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// GET `/api/health` - Liveness probe.
pub async fn api_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn status_for(error: &GraphError) -> StatusCode {
    match error {
        GraphError::Access(_) => StatusCode::SERVICE_UNAVAILABLE,
        GraphError::Cancelled => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
