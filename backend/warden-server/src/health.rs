use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Daemon status without touching the upstream feeds
pub async fn health(State(state): State<AppState>) -> Response {
    let reconciliation = if state.shutdown.is_shutdown() {
        "stopping"
    } else {
        "operational"
    };
    let update_guard = if state.controller.is_updating() {
        "held"
    } else {
        "free"
    };

    let health = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "reconciliation": reconciliation,
            "update_guard": update_guard,
        },
        "applied_version": state.controller.applied_version(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe. Not ready once shutdown has begun.
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }
    (StatusCode::OK, "Ready").into_response()
}
