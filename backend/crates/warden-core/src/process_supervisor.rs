use crate::process::{ProcessLauncher, RunOutcome};
use crate::{CoreError, Result, UpdateGuard, UpdatePermit, VersionId, VersionOracle};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::{Mutex, MutexGuard};
use warden_config::ServerConfig;

/// Outcome of a timeout-bounded command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedRun {
    Completed,
    Forced,
}

/// Outcome of [`ProcessSupervisor::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateReport {
    Applied {
        version: Option<VersionId>,
        pid: Option<u32>,
    },
    Forced,
}

#[derive(Debug, Clone)]
struct Commands {
    start: String,
    stop: String,
    update: String,
}

/// The only component allowed to spawn or terminate server commands.
///
/// At most one command handle exists at a time. An update transaction keeps
/// the handle slot from the update command until the restarted server is
/// launched, so manual commands can never land in the middle of it. Manual
/// commands check the update guard again once they hold the slot.
pub struct ProcessSupervisor {
    commands: Commands,
    launcher: Arc<dyn ProcessLauncher>,
    oracle: Arc<VersionOracle>,
    guard: UpdateGuard,
    handle_slot: Mutex<()>,
    generation: AtomicU64,
}

impl ProcessSupervisor {
    pub fn new(
        config: &ServerConfig,
        launcher: Arc<dyn ProcessLauncher>,
        oracle: Arc<VersionOracle>,
        guard: UpdateGuard,
    ) -> Self {
        Self {
            commands: Commands {
                start: config.start_command.clone(),
                stop: config.stop_command.clone(),
                update: config.update_command.clone(),
            },
            launcher,
            oracle,
            guard,
            handle_slot: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Count of commands launched so far.
    ///
    /// Read it before looking at the status feed and hand it back to
    /// [`start`](Self::start) or [`stop`](Self::stop): if anything ran in
    /// between, the status answer is stale and the command is refused.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Launch the start command detached and return its PID.
    ///
    /// Refused with `UpdateInProgress` while an update holds the guard and
    /// with `ProcessBusy` if another command holds the slot or ran since
    /// `observed`.
    pub async fn start(&self, observed: u64) -> Result<u32> {
        let _slot = self.claim_slot(observed)?;
        self.launch_start().await
    }

    /// Run the stop command, killing it after `timeout`. Same refusals as
    /// [`start`](Self::start).
    pub async fn stop(&self, observed: u64, timeout: Duration) -> Result<BoundedRun> {
        let _slot = self.claim_slot(observed)?;
        self.run_stop(timeout).await
    }

    /// The stop half of an automatic update. Waits for the slot.
    pub async fn stop_for_update(
        &self,
        _permit: &UpdatePermit,
        timeout: Duration,
    ) -> Result<BoundedRun> {
        let _slot = self.handle_slot.lock().await;
        self.run_stop(timeout).await
    }

    /// Run the update command under an update permit.
    ///
    /// On completion the upstream version is recorded as applied and the
    /// server is started. A forced (timed out) update records nothing and
    /// leaves the server stopped. The slot is held throughout.
    pub async fn update(
        &self,
        _permit: &UpdatePermit,
        timeout: Duration,
    ) -> Result<UpdateReport> {
        let _slot = self.handle_slot.lock().await;

        info!("Updating server (timeout {}s)", timeout.as_secs());
        if self.run_bounded(&self.commands.update, timeout).await? == BoundedRun::Forced {
            warn!("Update command timed out and was killed; server left stopped");
            return Ok(UpdateReport::Forced);
        }

        let recorded = match self.oracle.remote_version().await {
            Ok(version) => self
                .oracle
                .record_applied_version(version)
                .await
                .map(|()| Some(version)),
            Err(e) => {
                warn!("Update finished but upstream version is unknown, not recording it: {e}");
                Ok(None)
            }
        };

        // The server comes back up even if recording failed
        let pid = match self.launch_start().await {
            Ok(pid) => Some(pid),
            Err(e) => {
                error!("Update finished but the server failed to start: {e}");
                None
            }
        };

        let version = recorded?;
        Ok(UpdateReport::Applied { version, pid })
    }

    fn claim_slot(&self, observed: u64) -> Result<MutexGuard<'_, ()>> {
        let slot = match self.handle_slot.try_lock() {
            Ok(slot) => slot,
            Err(_) if self.guard.is_held() => return Err(CoreError::update_in_progress()),
            Err(_) => return Err(CoreError::process_busy()),
        };

        if self.guard.is_held() {
            return Err(CoreError::update_in_progress());
        }
        if self.generation() != observed {
            debug!("Another command ran since the status was read");
            return Err(CoreError::process_busy());
        }

        Ok(slot)
    }

    // Callers hold the slot.
    async fn launch_start(&self) -> Result<u32> {
        info!("Starting server");
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.launcher.spawn_detached(&self.commands.start).await
    }

    async fn run_stop(&self, timeout: Duration) -> Result<BoundedRun> {
        info!("Stopping server (timeout {}s)", timeout.as_secs());
        let run = self.run_bounded(&self.commands.stop, timeout).await?;
        if run == BoundedRun::Forced {
            warn!("Stop command timed out and was killed");
        }
        Ok(run)
    }

    async fn run_bounded(&self, command: &str, timeout: Duration) -> Result<BoundedRun> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        match self.launcher.run_bounded(command, timeout).await? {
            RunOutcome::Exited { code } => {
                debug!("'{command}' exit code {code:?}");
                Ok(BoundedRun::Completed)
            }
            RunOutcome::TimedOut => Ok(BoundedRun::Forced),
        }
    }
}
