//! REST API error types
//!
//! Every failure leaves the daemon as `{"error": {"code", "message"}}` with a
//! status code the CLI can branch on.

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;
use warden_core::CoreError;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UPDATE_IN_PROGRESS")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Update guard already held (409)
    #[error("Update in progress: {message} {location}")]
    UpdateInProgress {
        message: String,
        location: ErrorLocation,
    },

    /// Supervisor handle slot occupied (409)
    #[error("Process busy: {message} {location}")]
    ProcessBusy {
        message: String,
        location: ErrorLocation,
    },

    /// Upstream feed unreachable (503)
    #[error("Feed unavailable: {message} {location}")]
    FeedUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Upstream feed answered with something unparseable (502)
    #[error("Feed malformed: {message} {location}")]
    FeedMalformed {
        message: String,
        location: ErrorLocation,
    },

    /// No operator identity supplied (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Operator not on the allow-list (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    fn status_and_body(self) -> (StatusCode, ApiErrorBody) {
        let (status, code, message) = match self {
            ApiError::UpdateInProgress { message, .. } => {
                (StatusCode::CONFLICT, "UPDATE_IN_PROGRESS", message)
            }
            ApiError::ProcessBusy { message, .. } => (StatusCode::CONFLICT, "PROCESS_BUSY", message),
            ApiError::FeedUnavailable { message, .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "FEED_UNAVAILABLE", message)
            }
            ApiError::FeedMalformed { message, .. } => {
                (StatusCode::BAD_GATEWAY, "FEED_MALFORMED", message)
            }
            ApiError::Unauthorized { message, .. } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
            }
            ApiError::Forbidden { message, .. } => (StatusCode::FORBIDDEN, "FORBIDDEN", message),
            ApiError::Internal { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
        };

        (
            status,
            ApiErrorBody {
                code: code.into(),
                message,
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log with location before the body drops it
        if matches!(self, ApiError::Internal { .. }) {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (status, body) = self.status_and_body();
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert orchestration errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::UpdateInProgress { .. } => ApiError::UpdateInProgress {
                message: "An update is already in progress".to_string(),
                location,
            },
            CoreError::ProcessBusy { .. } => ApiError::ProcessBusy {
                message: "Another server command is still running".to_string(),
                location,
            },
            CoreError::FeedUnavailable { feed, message, .. } => ApiError::FeedUnavailable {
                message: format!("{feed} feed unavailable: {message}"),
                location,
            },
            CoreError::FeedMalformed { feed, message, .. } => ApiError::FeedMalformed {
                message: format!("{feed} feed returned a malformed response: {message}"),
                location,
            },
            CoreError::ProcessSpawn {
                command, source, ..
            } => ApiError::Internal {
                message: format!("Failed to run '{command}': {source}"),
                location,
            },
            CoreError::ProcessWait {
                command, source, ..
            } => ApiError::Internal {
                message: format!("Lost track of '{command}': {source}"),
                location,
            },
            CoreError::Persist { source, .. } => {
                // Keep the path out of the response body
                log::error!("Persisting applied version failed: {source}");
                ApiError::Internal {
                    message: "Update applied but the new version could not be recorded"
                        .to_string(),
                    location,
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
