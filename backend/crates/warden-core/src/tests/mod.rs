
use crate::feeds::{StatusFeed, VersionFeed};
use crate::process::{ProcessLauncher, RunOutcome};
use crate::{
    CoreError, OccupancyChecker, Result, ServerController, ServerDescriptor, VersionId,
    VersionOracle,
};

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use warden_config::ServerConfig;

pub(crate) const START_COMMAND: &str = "start-server";
pub(crate) const STOP_COMMAND: &str = "stop-server";
pub(crate) const UPDATE_COMMAND: &str = "update-server";

pub(crate) fn test_server_config() -> ServerConfig {
    ServerConfig {
        start_command: START_COMMAND.to_string(),
        stop_command: STOP_COMMAND.to_string(),
        update_command: UPDATE_COMMAND.to_string(),
        start_timeout_seconds: 5,
        stop_timeout_seconds: 5,
        reconciliation_interval_seconds: 10,
        app_id: 2394010,
        addr: String::from("203.0.113.10:27015"),
        applied_version: 0,
    }
}

// =========================================================================
// Fake launcher
// =========================================================================

/// Records commands instead of running them.
#[derive(Default)]
pub(crate) struct FakeLauncher {
    spawned: Mutex<Vec<String>>,
    runs: Mutex<Vec<String>>,
    timing_out: Mutex<HashSet<String>>,
    run_delay: Mutex<Duration>,
    next_pid: AtomicU32,
}

impl FakeLauncher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            next_pid: AtomicU32::new(4242),
            ..Self::default()
        })
    }

    pub(crate) fn time_out(&self, command: &str) {
        self.timing_out.lock().unwrap().insert(command.to_string());
    }

    pub(crate) fn set_run_delay(&self, delay: Duration) {
        *self.run_delay.lock().unwrap() = delay;
    }

    pub(crate) fn spawned(&self) -> Vec<String> {
        self.spawned.lock().unwrap().clone()
    }

    pub(crate) fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap().clone()
    }

    pub(crate) fn run_count(&self, command: &str) -> usize {
        self.runs
            .lock()
            .unwrap()
            .iter()
            .filter(|run| run.as_str() == command)
            .count()
    }
}

#[async_trait]
impl ProcessLauncher for FakeLauncher {
    async fn spawn_detached(&self, command: &str) -> Result<u32> {
        self.spawned.lock().unwrap().push(command.to_string());
        Ok(self.next_pid.fetch_add(1, Ordering::SeqCst))
    }

    async fn run_bounded(&self, command: &str, _timeout: Duration) -> Result<RunOutcome> {
        self.runs.lock().unwrap().push(command.to_string());

        let delay = *self.run_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.timing_out.lock().unwrap().contains(command) {
            Ok(RunOutcome::TimedOut)
        } else {
            Ok(RunOutcome::Exited { code: Some(0) })
        }
    }
}

// =========================================================================
// Fake feeds
// =========================================================================

/// Upstream version source; `None` simulates an outage.
pub(crate) struct FakeVersionFeed {
    version: Mutex<Option<VersionId>>,
    panic_next: AtomicBool,
    calls: AtomicUsize,
}

impl FakeVersionFeed {
    pub(crate) fn new(version: Option<VersionId>) -> Arc<Self> {
        Arc::new(Self {
            version: Mutex::new(version),
            panic_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set(&self, version: Option<VersionId>) {
        *self.version.lock().unwrap() = version;
    }

    pub(crate) fn panic_next(&self) {
        self.panic_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionFeed for FakeVersionFeed {
    async fn latest_version(&self) -> Result<VersionId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("version feed exploded");
        }
        let version = *self.version.lock().unwrap();
        version.ok_or_else(|| CoreError::feed_unavailable("Version", "connection refused"))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum FakeStatus {
    Offline,
    Online { players: u32 },
    Unavailable,
}

pub(crate) struct FakeStatusFeed {
    status: Mutex<FakeStatus>,
    delay: Mutex<Duration>,
    calls: AtomicUsize,
}

impl FakeStatusFeed {
    pub(crate) fn new(status: FakeStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            delay: Mutex::new(Duration::ZERO),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set(&self, status: FakeStatus) {
        *self.status.lock().unwrap() = status;
    }

    /// Every lookup sleeps this long before answering.
    pub(crate) fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn descriptor(players: u32) -> ServerDescriptor {
    ServerDescriptor {
        name: String::from("Warden Test Server"),
        address: String::from("203.0.113.10:27015"),
        player_count: players,
        max_players: 16,
    }
}

#[async_trait]
impl StatusFeed for FakeStatusFeed {
    async fn lookup(&self) -> Result<Option<ServerDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let status = *self.status.lock().unwrap();
        match status {
            FakeStatus::Offline => Ok(None),
            FakeStatus::Online { players } => Ok(Some(descriptor(players))),
            FakeStatus::Unavailable => Err(CoreError::feed_unavailable("Status", "timed out")),
        }
    }
}

// =========================================================================
// Harness
// =========================================================================

pub(crate) struct Harness {
    pub(crate) controller: Arc<ServerController>,
    pub(crate) launcher: Arc<FakeLauncher>,
    pub(crate) versions: Arc<FakeVersionFeed>,
    pub(crate) status: Arc<FakeStatusFeed>,
    pub(crate) state_path: PathBuf,
    _state_dir: TempDir,
}

/// Controller wired to fakes: applied version `applied`, upstream `remote`.
pub(crate) fn harness(
    applied: VersionId,
    remote: Option<VersionId>,
    status: FakeStatus,
) -> Harness {
    let state_dir = TempDir::new().unwrap();
    let state_path = state_dir.path().join("applied_version.json");

    let launcher = FakeLauncher::new();
    let versions = FakeVersionFeed::new(remote);
    let status = FakeStatusFeed::new(status);

    let oracle = Arc::new(
        VersionOracle::new(
            Arc::clone(&versions) as Arc<dyn VersionFeed>,
            state_path.clone(),
            applied,
        )
        .unwrap(),
    );

    let controller = Arc::new(ServerController::new(
        &test_server_config(),
        Arc::clone(&launcher) as Arc<dyn ProcessLauncher>,
        oracle,
        OccupancyChecker::new(Arc::clone(&status) as Arc<dyn StatusFeed>),
    ));

    Harness {
        controller,
        launcher,
        versions,
        status,
        state_path,
        _state_dir: state_dir,
    }
}
