use crate::{CommandResponse, StatusResponse, VersionsResponse};

use googletest::prelude::*;
use warden_core::{
    ServerDescriptor, ServerStatus, StartOutcome, StopOutcome, UpdateOutcome, VersionsReport,
};

// =========================================================================
// Outcome codes
// =========================================================================

#[test]
fn given_launched_when_mapped_then_started_with_pid() {
    let response = CommandResponse::from(StartOutcome::Launched { pid: 4242 });

    assert_that!(response.outcome, eq("STARTED"));
    assert_that!(response.pid, some(eq(4242)));
    assert_that!(response.version, none());
}

#[test]
fn given_every_outcome_when_mapped_then_codes_are_distinct() {
    let responses = [
        CommandResponse::from(StartOutcome::Launched { pid: 1 }),
        CommandResponse::from(StartOutcome::AlreadyOnline),
        CommandResponse::from(StopOutcome::Stopped),
        CommandResponse::from(StopOutcome::AlreadyStopped),
        CommandResponse::from(StopOutcome::Forced),
        CommandResponse::from(UpdateOutcome::Updated {
            version: Some(7),
            pid: Some(1),
        }),
        CommandResponse::from(UpdateOutcome::Forced),
        CommandResponse::from(UpdateOutcome::ServerOnline),
        CommandResponse::from(UpdateOutcome::StopFailed),
    ];

    let mut codes: Vec<&str> = responses.iter().map(|r| r.outcome.as_str()).collect();
    let mut messages: Vec<&str> = responses.iter().map(|r| r.message.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    messages.sort_unstable();
    messages.dedup();

    assert_that!(codes.len(), eq(responses.len()));
    assert_that!(messages.len(), eq(responses.len()));
}

#[test]
fn given_update_with_unconfirmed_version_when_mapped_then_message_says_so() {
    let response = CommandResponse::from(UpdateOutcome::Updated {
        version: None,
        pid: Some(9),
    });

    assert_that!(response.outcome, eq("UPDATED"));
    assert_that!(response.version, none());
    assert!(response.message.contains("could not be confirmed"));
}

#[test]
fn given_update_whose_restart_failed_when_mapped_then_pid_absent() {
    let response = CommandResponse::from(UpdateOutcome::Updated {
        version: Some(12),
        pid: None,
    });

    assert_that!(response.version, some(eq(12)));
    assert_that!(response.pid, none());
    assert!(response.message.contains("failed to restart"));
}

#[test]
fn given_response_without_pid_when_serialized_then_optional_fields_omitted() {
    let json = serde_json::to_value(CommandResponse::from(StopOutcome::Stopped)).unwrap();

    assert_eq!(json["outcome"], "STOPPED");
    assert!(json.get("pid").is_none());
    assert!(json.get("version").is_none());
}

// =========================================================================
// Queries
// =========================================================================

#[test]
fn given_online_status_when_mapped_then_server_info_present() {
    let status = ServerStatus::Online(ServerDescriptor {
        name: "Warden".to_string(),
        address: "203.0.113.10:27015".to_string(),
        player_count: 3,
        max_players: 16,
    });

    let response = StatusResponse::from(status);

    assert_that!(response.state, eq("online"));
    assert_that!(response.server.map(|s| s.player_count), some(eq(3)));
}

#[test]
fn given_updating_status_when_mapped_then_no_server_info() {
    let response = StatusResponse::from(ServerStatus::Updating);

    assert_that!(response.state, eq("updating"));
    assert!(response.server.is_none());
}

#[test]
fn given_newer_remote_when_mapped_then_update_available() {
    let response = VersionsResponse::from(VersionsReport {
        applied: 10,
        remote: Some(11),
        remote_error: None,
    });

    assert_that!(response.update_available, eq(true));
}

#[test]
fn given_feed_error_when_mapped_then_error_carried_and_no_update() {
    let response = VersionsResponse::from(VersionsReport {
        applied: 10,
        remote: None,
        remote_error: Some("Version feed unavailable".to_string()),
    });

    assert_that!(response.update_available, eq(false));
    assert!(response.remote_error.is_some());
}
