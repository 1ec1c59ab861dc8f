mod api;

use crate::AppState;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use warden_config::{ApiConfig, ServerConfig};
use warden_core::process::{ProcessLauncher, RunOutcome};
use warden_core::{
    OccupancyChecker, Result, ServerController, ServerDescriptor, ShutdownCoordinator,
    StatusFeed, VersionFeed, VersionId, VersionOracle,
};

pub(crate) const ALLOWED_OPERATOR: &str = "ops-alice";

struct IdleLauncher;

#[async_trait]
impl ProcessLauncher for IdleLauncher {
    async fn spawn_detached(&self, _command: &str) -> Result<u32> {
        Ok(1)
    }

    async fn run_bounded(&self, _command: &str, _timeout: Duration) -> Result<RunOutcome> {
        Ok(RunOutcome::Exited { code: Some(0) })
    }
}

struct FixedVersion(VersionId);

#[async_trait]
impl VersionFeed for FixedVersion {
    async fn latest_version(&self) -> Result<VersionId> {
        Ok(self.0)
    }
}

struct EmptyServerList;

#[async_trait]
impl StatusFeed for EmptyServerList {
    async fn lookup(&self) -> Result<Option<ServerDescriptor>> {
        Ok(None)
    }
}

/// AppState over an idle controller; the TempDir holds the state file.
pub(crate) fn create_test_state() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let server = ServerConfig {
        start_command: "start".to_string(),
        stop_command: "stop".to_string(),
        update_command: "update".to_string(),
        app_id: 2394010,
        addr: "203.0.113.10:27015".to_string(),
        ..ServerConfig::default()
    };
    let oracle = Arc::new(
        VersionOracle::new(
            Arc::new(FixedVersion(100)),
            dir.path().join("applied_version.json"),
            100,
        )
        .unwrap(),
    );
    let controller = ServerController::new(
        &server,
        Arc::new(IdleLauncher),
        oracle,
        OccupancyChecker::new(Arc::new(EmptyServerList)),
    );

    let state = AppState {
        controller: Arc::new(controller),
        api_config: ApiConfig {
            allowed_operators: vec![ALLOWED_OPERATOR.to_string()],
            ..ApiConfig::default()
        },
        shutdown: ShutdownCoordinator::new(),
    };
    (state, dir)
}
