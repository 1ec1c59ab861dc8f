//! Operator-facing lines for daemon responses.
//!
//! Every outcome and error code maps to its own sentence so an operator can
//! tell "an update is already running" from "the update timed out" at a glance.

use crate::{ClientError, Commands};

use serde_json::Value;

/// One rendered line plus whether the command achieved what was asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub line: String,
    pub success: bool,
}

impl Rendered {
    fn ok(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            success: true,
        }
    }

    fn failed(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            success: false,
        }
    }
}

pub fn render_response(command: Commands, body: &Value) -> Rendered {
    match command {
        Commands::Start | Commands::Stop | Commands::Update => render_outcome(body),
        Commands::Status => render_status(body),
        Commands::Versions => render_versions(body),
        Commands::Shutdown => Rendered::ok("warden-server is shutting down"),
    }
}

fn render_outcome(body: &Value) -> Rendered {
    let outcome = body["outcome"].as_str().unwrap_or_default();
    let version = body["version"].as_u64();
    let pid = body["pid"].as_u64();

    match outcome {
        "STARTED" => match pid {
            Some(pid) => Rendered::ok(format!("Server started (pid {pid})")),
            None => Rendered::ok("Server started"),
        },
        "ALREADY_ONLINE" => Rendered::ok("Server is already online"),
        "STOPPED" => Rendered::ok("Server stopped"),
        "ALREADY_STOPPED" => Rendered::ok("Server is offline; nothing to stop"),
        "STOP_FORCED" => Rendered::failed("Stop timed out and the stop command was killed"),
        "UPDATED" => {
            let updated = match version {
                Some(version) => format!("Server updated to version {version}"),
                None => "Server updated (new version could not be confirmed)".to_string(),
            };
            match pid {
                Some(pid) => Rendered::ok(format!("{updated} and restarted (pid {pid})")),
                None => Rendered::failed(format!("{updated} but failed to restart")),
            }
        }
        "UPDATE_FORCED" => Rendered::failed("Update timed out and was aborted"),
        "SERVER_ONLINE" => Rendered::failed("Server is online; stop it before updating"),
        "STOP_FAILED" => Rendered::failed("Stop timed out; update was not attempted"),
        _ => {
            let message = body["message"].as_str().unwrap_or("Unrecognized response");
            Rendered::failed(format!("{message} ({outcome})"))
        }
    }
}

fn render_status(body: &Value) -> Rendered {
    match body["state"].as_str() {
        Some("online") => {
            let server = &body["server"];
            Rendered::ok(format!(
                "Server '{}' is online at {} with {}/{} players",
                server["name"].as_str().unwrap_or("unknown"),
                server["address"].as_str().unwrap_or("unknown"),
                server["player_count"].as_u64().unwrap_or(0),
                server["max_players"].as_u64().unwrap_or(0),
            ))
        }
        Some("offline") => Rendered::ok("Server is offline"),
        Some("updating") => Rendered::ok("Server is being updated"),
        _ => Rendered::failed("Unrecognized status response"),
    }
}

fn render_versions(body: &Value) -> Rendered {
    let applied = body["applied"].as_u64().unwrap_or(0);

    match body["remote"].as_u64() {
        Some(remote) if body["update_available"].as_bool().unwrap_or(remote != applied) => {
            Rendered::ok(format!(
                "Applied version {applied}, latest {remote}: update available"
            ))
        }
        Some(remote) => Rendered::ok(format!(
            "Applied version {applied}, latest {remote}: up to date"
        )),
        None => {
            let reason = body["remote_error"].as_str().unwrap_or("unknown error");
            Rendered::failed(format!(
                "Applied version {applied}, latest unknown ({reason})"
            ))
        }
    }
}

pub fn render_error(error: &ClientError, server_url: &str) -> Rendered {
    let line = match error {
        ClientError::Api { code, message, .. } => match code.as_str() {
            "UPDATE_IN_PROGRESS" => "An update is already in progress".to_string(),
            "PROCESS_BUSY" => "Another server command is still running; try again shortly".to_string(),
            "FEED_UNAVAILABLE" => format!("Steam could not be reached: {message}"),
            "FEED_MALFORMED" => format!("Steam returned an unexpected response: {message}"),
            "UNAUTHORIZED" => {
                "No operator id given (use --operator or WARDEN_OPERATOR_ID)".to_string()
            }
            "FORBIDDEN" => "You are not on this server's operator list".to_string(),
            _ => format!("Server error: {message} ({code})"),
        },
        ClientError::Http { message, .. } => {
            format!("Could not reach warden-server at {server_url}: {message}")
        }
        ClientError::Json { message, .. } => {
            format!("warden-server sent an unreadable response: {message}")
        }
    };
    Rendered::failed(line)
}
