//! Administrative endpoints for daemon management.

use crate::{AppState, OperatorId};

use axum::{extract::State, http::StatusCode};
use log::info;

/// Graceful shutdown endpoint.
///
/// Stops accepting requests and ends the reconciliation loop after its
/// current tick. A running update command is not interrupted.
pub async fn shutdown_handler(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
) -> StatusCode {
    info!("Graceful shutdown requested via HTTP by '{operator}'");
    state.shutdown.shutdown();
    StatusCode::ACCEPTED
}
