use crate::Result;
use crate::process::RunOutcome;

use std::time::Duration;

use async_trait::async_trait;

/// Launches and waits on server commands.
///
/// Whether a command goes through a shell or is executed directly is up to
/// the implementation.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Launch `command` detached from this process and return its PID
    /// without waiting for it.
    async fn spawn_detached(&self, command: &str) -> Result<u32>;

    /// Run `command` to completion, killing it once `timeout` elapses.
    async fn run_bounded(&self, command: &str, timeout: Duration) -> Result<RunOutcome>;
}
