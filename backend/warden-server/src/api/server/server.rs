//! Server lifecycle REST API handlers
//!
//! Each handler awaits only its own controller call. Refusals (update in
//! progress, process busy) come back immediately as errors.

use crate::{ApiResult, AppState, CommandResponse, OperatorId, StatusResponse, VersionsResponse};

use axum::{Json, extract::State};
use log::info;

// =============================================================================
// Commands
// =============================================================================

/// POST /api/v1/server/start
pub async fn start_server(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
) -> ApiResult<Json<CommandResponse>> {
    info!("Operator '{operator}' requested start");
    let outcome = state.controller.manual_start().await?;
    info!("Start by '{operator}': {outcome:?}");
    Ok(Json(outcome.into()))
}

/// POST /api/v1/server/stop
pub async fn stop_server(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
) -> ApiResult<Json<CommandResponse>> {
    info!("Operator '{operator}' requested stop");
    let outcome = state.controller.manual_stop().await?;
    info!("Stop by '{operator}': {outcome:?}");
    Ok(Json(outcome.into()))
}

/// POST /api/v1/server/update
pub async fn update_server(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
) -> ApiResult<Json<CommandResponse>> {
    info!("Operator '{operator}' requested update");
    let outcome = state.controller.manual_update().await?;
    info!("Update by '{operator}': {outcome:?}");
    Ok(Json(outcome.into()))
}

// =============================================================================
// Queries
// =============================================================================

/// GET /api/v1/server/status
pub async fn server_status(
    State(state): State<AppState>,
    OperatorId(_operator): OperatorId,
) -> ApiResult<Json<StatusResponse>> {
    let status = state.controller.status().await?;
    Ok(Json(status.into()))
}

/// GET /api/v1/server/versions
///
/// Always answers; a version feed failure is reported in `remote_error`.
pub async fn server_versions(
    State(state): State<AppState>,
    OperatorId(_operator): OperatorId,
) -> Json<VersionsResponse> {
    Json(state.controller.versions().await.into())
}
