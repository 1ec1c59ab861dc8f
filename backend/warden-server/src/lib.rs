pub mod admin;
pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::operator_id::{OPERATOR_ID_HEADER, OperatorId},
    server::{
        command_response::CommandResponse,
        server::{server_status, server_versions, start_server, stop_server, update_server},
        status_response::{ServerInfo, StatusResponse},
        versions_response::VersionsResponse,
    },
};
pub use app_state::AppState;
pub use error::{Result, ServerError};

pub use crate::routes::build_router;
