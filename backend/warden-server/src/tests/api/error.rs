use crate::ApiError;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use googletest::prelude::*;
use http_body_util::BodyExt;
use warden_core::CoreError;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

// =========================================================================
// Status code mapping
// =========================================================================

#[tokio::test]
async fn given_update_in_progress_when_converted_then_409_with_code() {
    // Given
    let error = ApiError::from(CoreError::update_in_progress());

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::CONFLICT));
    assert_eq!(json["error"]["code"], "UPDATE_IN_PROGRESS");
    assert_eq!(json["error"]["message"], "An update is already in progress");
}

#[tokio::test]
async fn given_process_busy_when_converted_then_409_process_busy() {
    let (status, json) = body_json(ApiError::from(CoreError::process_busy())).await;

    assert_that!(status, eq(StatusCode::CONFLICT));
    assert_eq!(json["error"]["code"], "PROCESS_BUSY");
}

#[tokio::test]
async fn given_feed_unavailable_when_converted_then_503_naming_feed() {
    let error = ApiError::from(CoreError::feed_unavailable("Status", "connection refused"));

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(json["error"]["code"], "FEED_UNAVAILABLE");
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.contains("Status feed"));
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn given_feed_malformed_when_converted_then_502() {
    let error = ApiError::from(CoreError::feed_malformed("Version", "missing change number"));

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::BAD_GATEWAY));
    assert_eq!(json["error"]["code"], "FEED_MALFORMED");
}

#[tokio::test]
async fn given_spawn_failure_when_converted_then_500_internal() {
    let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let error = ApiError::from(CoreError::process_spawn("start-server", source));

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(json["error"]["message"].as_str().unwrap().contains("start-server"));
}

#[tokio::test]
async fn given_gate_errors_when_converted_then_401_and_403() {
    let (unauthorized, json) = body_json(ApiError::unauthorized("Missing header")).await;
    assert_that!(unauthorized, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");

    let (forbidden, json) = body_json(ApiError::forbidden("Not allowed")).await;
    assert_that!(forbidden, eq(StatusCode::FORBIDDEN));
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn given_error_body_when_serialized_then_location_is_not_exposed() {
    let (_, json) = body_json(ApiError::from(CoreError::update_in_progress())).await;

    let message = json["error"]["message"].as_str().unwrap();
    assert!(!message.contains(".rs"));
}
