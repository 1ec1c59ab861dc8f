use serde::{Deserialize, Serialize};
use warden_core::{StartOutcome, StopOutcome, UpdateOutcome};

/// Result of an operator command.
///
/// `outcome` is a stable code; `message` is the operator-facing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub outcome: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
}

impl CommandResponse {
    fn new(outcome: &str, message: impl Into<String>) -> Self {
        Self {
            outcome: outcome.to_string(),
            message: message.into(),
            version: None,
            pid: None,
        }
    }
}

impl From<StartOutcome> for CommandResponse {
    fn from(outcome: StartOutcome) -> Self {
        match outcome {
            StartOutcome::Launched { pid } => Self {
                pid: Some(pid),
                ..Self::new("STARTED", format!("Server started (pid {pid})"))
            },
            StartOutcome::AlreadyOnline => Self::new("ALREADY_ONLINE", "Server is already online"),
        }
    }
}

impl From<StopOutcome> for CommandResponse {
    fn from(outcome: StopOutcome) -> Self {
        match outcome {
            StopOutcome::Stopped => Self::new("STOPPED", "Server stopped"),
            StopOutcome::AlreadyStopped => Self::new("ALREADY_STOPPED", "Server is already offline"),
            StopOutcome::Forced => Self::new(
                "STOP_FORCED",
                "Stop command timed out and was forcibly terminated",
            ),
        }
    }
}

impl From<UpdateOutcome> for CommandResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::Updated { version, pid } => {
                let mut message = match version {
                    Some(version) => format!("Server updated to version {version}"),
                    None => "Server updated; the new version could not be confirmed".to_string(),
                };
                match pid {
                    Some(pid) => message.push_str(&format!(" and restarted (pid {pid})")),
                    None => message.push_str(", but it failed to restart"),
                }
                Self {
                    version,
                    pid,
                    ..Self::new("UPDATED", message)
                }
            }
            UpdateOutcome::Forced => {
                Self::new("UPDATE_FORCED", "Update timed out and was aborted")
            }
            UpdateOutcome::ServerOnline => Self::new(
                "SERVER_ONLINE",
                "Server is online; stop it before updating",
            ),
            // Only the reconciliation loop stops before updating
            UpdateOutcome::StopFailed => Self::new(
                "STOP_FAILED",
                "Stop command timed out; update was not attempted",
            ),
        }
    }
}
