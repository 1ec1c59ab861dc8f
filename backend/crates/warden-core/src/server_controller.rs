use crate::feeds::{StatusFeed, SteamCmdVersionFeed, SteamServerListFeed, VersionFeed};
use crate::process::{ProcessLauncher, ShellLauncher};
use crate::{
    BoundedRun, CoreError, OccupancyChecker, ProcessSupervisor, Result, ServerStatus,
    StartOutcome, StopOutcome, UpdateGuard, UpdateOutcome, UpdatePermit, UpdateReport, VersionId,
    VersionOracle, VersionsReport,
};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use warden_config::{Config, ServerConfig};

/// Single owner of the lifecycle state.
///
/// Every operator command and every automatic update goes through this
/// type, so the update guard and the supervisor's handle slot are the only
/// arbitration points.
pub struct ServerController {
    supervisor: ProcessSupervisor,
    oracle: Arc<VersionOracle>,
    occupancy: OccupancyChecker,
    guard: UpdateGuard,
    start_timeout: Duration,
    stop_timeout: Duration,
}

impl ServerController {
    pub fn new(
        config: &ServerConfig,
        launcher: Arc<dyn ProcessLauncher>,
        oracle: Arc<VersionOracle>,
        occupancy: OccupancyChecker,
    ) -> Self {
        let guard = UpdateGuard::new();
        Self {
            supervisor: ProcessSupervisor::new(
                config,
                launcher,
                Arc::clone(&oracle),
                guard.clone(),
            ),
            oracle,
            occupancy,
            guard,
            start_timeout: config.start_timeout(),
            stop_timeout: config.stop_timeout(),
        }
    }

    /// Wire up the Steam feeds and the shell launcher from configuration.
    pub fn from_config(config: &Config, state_path: PathBuf) -> Result<Self> {
        let version_feed: Arc<dyn VersionFeed> =
            Arc::new(SteamCmdVersionFeed::new(&config.feeds, &config.server)?);
        let status_feed: Arc<dyn StatusFeed> =
            Arc::new(SteamServerListFeed::new(&config.feeds, &config.server)?);

        let oracle = Arc::new(VersionOracle::new(
            version_feed,
            state_path,
            config.server.applied_version,
        )?);

        Ok(Self::new(
            &config.server,
            Arc::new(ShellLauncher::new()),
            oracle,
            OccupancyChecker::new(status_feed),
        ))
    }

    /// Start the server unless it is already listed.
    ///
    /// The guard is checked again by the supervisor once it holds the handle
    /// slot, so an update that begins during the status lookup still wins.
    pub async fn manual_start(&self) -> Result<StartOutcome> {
        if self.guard.is_held() {
            return Err(CoreError::update_in_progress());
        }
        let observed = self.supervisor.generation();

        match self.occupancy.server_descriptor().await {
            Ok(Some(server)) => {
                info!("Start requested but '{}' is already online", server.name);
                return Ok(StartOutcome::AlreadyOnline);
            }
            Ok(None) => {}
            Err(e) => warn!("Could not confirm server is offline, starting anyway: {e}"),
        }

        let pid = self.supervisor.start(observed).await?;
        Ok(StartOutcome::Launched { pid })
    }

    pub async fn manual_stop(&self) -> Result<StopOutcome> {
        if self.guard.is_held() {
            return Err(CoreError::update_in_progress());
        }
        let observed = self.supervisor.generation();

        match self.occupancy.server_descriptor().await {
            Ok(None) => {
                info!("Stop requested but the server is already offline");
                return Ok(StopOutcome::AlreadyStopped);
            }
            Ok(Some(_)) => {}
            Err(e) => warn!("Could not confirm server is online, stopping anyway: {e}"),
        }

        Ok(match self.supervisor.stop(observed, self.stop_timeout).await? {
            BoundedRun::Completed => StopOutcome::Stopped,
            BoundedRun::Forced => StopOutcome::Forced,
        })
    }

    /// Update a stopped server. Refuses with `ServerOnline` while it runs.
    pub async fn manual_update(&self) -> Result<UpdateOutcome> {
        let Some(permit) = UpdatePermit::acquire(&self.guard) else {
            return Err(CoreError::update_in_progress());
        };

        if let Some(server) = self.occupancy.server_descriptor().await? {
            info!(
                "Update requested while '{}' is online ({} players)",
                server.name, server.player_count
            );
            return Ok(UpdateOutcome::ServerOnline);
        }

        self.run_update(&permit).await
    }

    /// The reconciliation transaction: stop, then update, under one permit.
    pub async fn automatic_update(&self) -> Result<UpdateOutcome> {
        let Some(permit) = UpdatePermit::acquire(&self.guard) else {
            return Err(CoreError::update_in_progress());
        };

        if self
            .supervisor
            .stop_for_update(&permit, self.stop_timeout)
            .await?
            == BoundedRun::Forced
        {
            return Ok(UpdateOutcome::StopFailed);
        }

        self.run_update(&permit).await
    }

    /// Online wins, then `Updating` while the guard is held, else `Offline`.
    pub async fn status(&self) -> Result<ServerStatus> {
        match self.occupancy.server_descriptor().await {
            Ok(Some(server)) => Ok(ServerStatus::Online(server)),
            Ok(None) if self.guard.is_held() => Ok(ServerStatus::Updating),
            Ok(None) => Ok(ServerStatus::Offline),
            Err(e) if self.guard.is_held() => {
                warn!("Status feed failed during an update: {e}");
                Ok(ServerStatus::Updating)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn versions(&self) -> VersionsReport {
        let applied = self.oracle.applied_version();
        match self.oracle.remote_version().await {
            Ok(remote) => VersionsReport {
                applied,
                remote: Some(remote),
                remote_error: None,
            },
            Err(e) => VersionsReport {
                applied,
                remote: None,
                remote_error: Some(e.to_string()),
            },
        }
    }

    pub async fn remote_version(&self) -> Result<VersionId> {
        self.oracle.remote_version().await
    }

    pub fn applied_version(&self) -> VersionId {
        self.oracle.applied_version()
    }

    pub async fn player_count(&self) -> u32 {
        self.occupancy.player_count().await
    }

    pub fn is_updating(&self) -> bool {
        self.guard.is_held()
    }

    #[cfg(test)]
    pub(crate) fn update_guard(&self) -> &UpdateGuard {
        &self.guard
    }

    async fn run_update(&self, permit: &UpdatePermit) -> Result<UpdateOutcome> {
        Ok(match self.supervisor.update(permit, self.start_timeout).await? {
            UpdateReport::Applied { version, pid } => UpdateOutcome::Updated { version, pid },
            UpdateReport::Forced => UpdateOutcome::Forced,
        })
    }
}
