//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Package name of the running binary.
    pub service: &'static str,
    /// Package version of the running binary.
    pub version: &'static str,
}

const HEALTHY: HealthResponse = HealthResponse {
    status: "ok",
    service: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

async fn health_check() -> Json<HealthResponse> {
    Json(HEALTHY)
}

/// Routes `GET /health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
