use crate::{CoreError, ServerController, ShutdownGuard, TickOutcome, UpdateOutcome};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use log::{debug, error, info, warn};

/// Periodically brings the applied version in line with upstream.
pub struct ReconciliationLoop {
    controller: Arc<ServerController>,
    interval: Duration,
}

impl ReconciliationLoop {
    pub fn new(controller: Arc<ServerController>, interval: Duration) -> Self {
        Self {
            controller,
            interval,
        }
    }

    /// Run until shutdown. The first tick runs immediately.
    ///
    /// A panicking tick is logged and the loop carries on with the next one.
    pub async fn run(self, mut shutdown: ShutdownGuard) {
        info!(
            "Reconciliation loop started (interval {}s)",
            self.interval.as_secs()
        );

        loop {
            if shutdown.poll_shutdown() {
                break;
            }

            match AssertUnwindSafe(self.tick()).catch_unwind().await {
                Ok(outcome) => debug!("Reconciliation tick: {outcome}"),
                Err(panic) => error!(
                    "Reconciliation tick panicked: {}",
                    panic_message(panic.as_ref())
                ),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.wait() => break,
            }
        }

        info!("Reconciliation loop stopped");
    }

    /// One pass: remote, then applied, then occupancy, each read only if
    /// the previous step did not settle the tick.
    pub async fn tick(&self) -> TickOutcome {
        let remote = match self.controller.remote_version().await {
            Ok(remote) => remote,
            Err(e) => {
                warn!("Skipping reconciliation, version feed failed: {e}");
                return TickOutcome::FeedUnavailable;
            }
        };

        let applied = self.controller.applied_version();
        if remote == applied {
            return TickOutcome::UpToDate;
        }

        let players = self.controller.player_count().await;
        if players > 0 {
            info!("Update {applied} -> {remote} available, deferred: {players} players online");
            return TickOutcome::Occupied { players };
        }

        info!("Update {applied} -> {remote} available and server idle, updating");
        match self.controller.automatic_update().await {
            Ok(UpdateOutcome::Updated { version, .. }) => TickOutcome::Completed { version },
            Ok(UpdateOutcome::Forced) => Self::failed("update command timed out"),
            Ok(UpdateOutcome::StopFailed) => Self::failed("stop command timed out"),
            Ok(UpdateOutcome::ServerOnline) => Self::failed("server still online"),
            Err(CoreError::UpdateInProgress { .. }) => {
                info!("Update already in progress, skipping tick");
                TickOutcome::GuardHeld
            }
            Err(e) => Self::failed(e.to_string()),
        }
    }

    fn failed(reason: impl Into<String>) -> TickOutcome {
        let reason = reason.into();
        error!("Automatic update failed: {reason}");
        TickOutcome::Failed { reason }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
