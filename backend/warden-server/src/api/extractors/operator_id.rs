//! Axum extractor for the operator allow-list gate

use crate::{ApiError, AppState};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const OPERATOR_ID_HEADER: &str = "X-Operator-Id";

/// The allow-listed operator issuing the request.
///
/// Rejects with 401 when `X-Operator-Id` is missing or blank and 403 when the
/// value is not in `api.allowed_operators`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorId(pub String);

impl FromRequestParts<AppState> for OperatorId {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let operator = parts
                .headers
                .get(OPERATOR_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    ApiError::unauthorized(format!("Missing {OPERATOR_ID_HEADER} header"))
                })?;

            if !state.api_config.is_allowed(operator) {
                log::warn!("Rejected command from operator '{operator}' (not allow-listed)");
                return Err(ApiError::forbidden(format!(
                    "Operator '{operator}' is not allowed to control this server"
                )));
            }

            log::debug!("Command from operator '{operator}'");
            Ok(OperatorId(operator.to_string()))
        }
    }
}
