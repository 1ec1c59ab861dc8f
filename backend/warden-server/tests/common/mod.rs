#![allow(dead_code)]

//! Test infrastructure for warden-server API tests

use warden_config::{ApiConfig, ServerConfig};
use warden_core::process::{ProcessLauncher, RunOutcome};
use warden_core::{
    CoreError, OccupancyChecker, Result, ServerController, ServerDescriptor, ShutdownCoordinator,
    StatusFeed, VersionFeed, VersionId, VersionOracle,
};
use warden_server::{AppState, OPERATOR_ID_HEADER, build_router};

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const OPERATOR: &str = "ops-alice";
pub const START_COMMAND: &str = "start-server";
pub const STOP_COMMAND: &str = "stop-server";
pub const UPDATE_COMMAND: &str = "update-server";

// =============================================================================
// Fakes
// =============================================================================

pub struct FakeLauncher {
    spawned: Mutex<Vec<String>>,
    runs: Mutex<Vec<String>>,
    timing_out: Mutex<HashSet<String>>,
    run_delay: Mutex<Duration>,
    next_pid: AtomicU32,
}

impl FakeLauncher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            spawned: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
            timing_out: Mutex::new(HashSet::new()),
            run_delay: Mutex::new(Duration::ZERO),
            next_pid: AtomicU32::new(7000),
        })
    }

    pub fn time_out(&self, command: &str) {
        self.timing_out.lock().unwrap().insert(command.to_string());
    }

    pub fn set_run_delay(&self, delay: Duration) {
        *self.run_delay.lock().unwrap() = delay;
    }

    pub fn spawned(&self) -> Vec<String> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap().clone()
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

/// `None` simulates a version feed outage.
pub struct FakeVersionFeed(Mutex<Option<VersionId>>);

impl FakeVersionFeed {
    pub fn set(&self, version: Option<VersionId>) {
        *self.0.lock().unwrap() = version;
    }
}

#[async_trait]
impl VersionFeed for FakeVersionFeed {
    async fn latest_version(&self) -> Result<VersionId> {
        let version = *self.0.lock().unwrap();
        version.ok_or_else(|| CoreError::feed_unavailable("Version", "connection refused"))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Listing {
    Offline,
    Online { players: u32 },
    Unavailable,
}

pub struct FakeStatusFeed(Mutex<Listing>);

impl FakeStatusFeed {
    pub fn set(&self, listing: Listing) {
        *self.0.lock().unwrap() = listing;
    }
}

#[async_trait]
impl StatusFeed for FakeStatusFeed {
    async fn lookup(&self) -> Result<Option<ServerDescriptor>> {
        let listing = *self.0.lock().unwrap();
        match listing {
            Listing::Offline => Ok(None),
            Listing::Online { players } => Ok(Some(ServerDescriptor {
                name: "Warden Test Server".to_string(),
                address: "203.0.113.10:27015".to_string(),
                player_count: players,
                max_players: 16,
            })),
            Listing::Unavailable => Err(CoreError::feed_unavailable("Status", "timed out")),
        }
    }
}

// =============================================================================
// App
// =============================================================================

pub struct TestApp {
    pub state: AppState,
    pub launcher: Arc<FakeLauncher>,
    pub versions: Arc<FakeVersionFeed>,
    pub status: Arc<FakeStatusFeed>,
    pub state_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }
}

/// Controller with applied version `applied`, upstream at `remote`.
pub fn create_test_app(applied: VersionId, remote: Option<VersionId>, listing: Listing) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let state_path = dir.path().join("applied_version.json");

    let launcher = FakeLauncher::new();
    let versions = Arc::new(FakeVersionFeed(Mutex::new(remote)));
    let status = Arc::new(FakeStatusFeed(Mutex::new(listing)));

    let server = ServerConfig {
        start_command: START_COMMAND.to_string(),
        stop_command: STOP_COMMAND.to_string(),
        update_command: UPDATE_COMMAND.to_string(),
        start_timeout_seconds: 5,
        stop_timeout_seconds: 5,
        app_id: 2394010,
        addr: "203.0.113.10:27015".to_string(),
        applied_version: applied,
        ..ServerConfig::default()
    };

    let oracle = Arc::new(
        VersionOracle::new(versions.clone(), state_path.clone(), applied)
            .expect("Failed to create oracle"),
    );
    let controller = ServerController::new(
        &server,
        launcher.clone(),
        oracle,
        OccupancyChecker::new(status.clone()),
    );

    let state = AppState {
        controller: Arc::new(controller),
        api_config: ApiConfig {
            allowed_operators: vec![OPERATOR.to_string(), "ops-bob".to_string()],
            ..ApiConfig::default()
        },
        shutdown: ShutdownCoordinator::new(),
    };

    TestApp {
        state,
        launcher,
        versions,
        status,
        state_path,
        _dir: dir,
    }
}

// =============================================================================
// Requests
// =============================================================================

pub fn request(method: &str, uri: &str, operator: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(operator) = operator {
        builder = builder.header(OPERATOR_ID_HEADER, operator);
    }
    builder.body(Body::empty()).unwrap()
}

/// Send one request and decode the JSON body (Null for non-JSON bodies).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn command(app: &TestApp, action: &str) -> (StatusCode, serde_json::Value) {
    send(
        app.router(),
        request("POST", &format!("/api/v1/server/{action}"), Some(OPERATOR)),
    )
    .await
}
