use std::sync::Arc;

use warden_config::ApiConfig;
use warden_core::{ServerController, ShutdownCoordinator};

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ServerController>,
    pub api_config: ApiConfig,
    pub shutdown: ShutdownCoordinator,
}
