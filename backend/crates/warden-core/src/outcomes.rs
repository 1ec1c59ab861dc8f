use crate::VersionId;

/// Result of a manual start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Launched { pid: u32 },
    AlreadyOnline,
}

/// Result of a manual stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    /// Status feed reported the server offline; no command was run.
    AlreadyStopped,
    /// The stop command timed out and was killed.
    Forced,
}

/// Result of a manual or automatic update transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The update command finished. `version` is `None` when the upstream
    /// version could not be confirmed afterwards; `pid` is `None` when the
    /// follow-up start failed.
    Updated {
        version: Option<VersionId>,
        pid: Option<u32>,
    },
    /// The update command timed out and was killed; nothing was persisted.
    Forced,
    /// Manual update refused because the server is running.
    ServerOnline,
    /// Automatic update aborted because the stop command timed out.
    StopFailed,
}

/// Diagnostic snapshot of both versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionsReport {
    pub applied: VersionId,
    pub remote: Option<VersionId>,
    pub remote_error: Option<String>,
}

impl VersionsReport {
    pub fn update_available(&self) -> bool {
        self.remote.is_some_and(|remote| remote != self.applied)
    }
}
