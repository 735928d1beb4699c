//! API request/response types for the graph server.

use axum::http::HeaderMap;
use serde::Serialize;

use wikigraph_core::Identity;

/// Header carrying the authenticated user name, set by the hosting proxy.
pub const USER_HEADER: &str = "x-wiki-user";

/// Header carrying comma-separated group names.
pub const GROUPS_HEADER: &str = "x-wiki-groups";

/// Error body for failed graph builds.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `/api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Derive the acting identity from request headers.
///
/// Missing or blank headers mean an anonymous request.
pub fn identity_from_headers(headers: &HeaderMap) -> Identity {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    Identity {
        user: header(USER_HEADER).map(str::to_string),
        groups: header(GROUPS_HEADER)
            .map(|groups| {
                groups
                    .split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
