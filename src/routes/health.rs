//! Health check endpoint for container orchestration.
//!
//! Reports process liveness and uptime as a small JSON document. Used by
//! Kubernetes, ECS, systemd, and load balancers to verify the service is
//! alive. Ignores all request parameters.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health status document returned by `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime: String,
    pub version: &'static str,
}

/// Health check handler.
///
/// Always responds 200 with the current timestamp and the elapsed time
/// since process start.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        uptime: state.info.uptime_human(),
        version: state.info.version,
    })
}
