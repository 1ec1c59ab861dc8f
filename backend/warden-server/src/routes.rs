use crate::{AppState, admin, api, health};

use axum::{
    Router,
    routing::{get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Operator commands
        .route("/api/v1/server/start", post(api::start_server))
        .route("/api/v1/server/stop", post(api::stop_server))
        .route("/api/v1/server/update", post(api::update_server))
        .route("/api/v1/server/status", get(api::server_status))
        .route("/api/v1/server/versions", get(api::server_versions))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Admin endpoints
        .route("/admin/shutdown", post(admin::shutdown_handler))
        .with_state(state)
}
