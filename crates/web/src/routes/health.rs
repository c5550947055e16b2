//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::sanity::ContentClient;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Runs a trivial query against the content store.
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(client): State<ContentClient>) -> StatusCode {
    match client.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
