use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_RECONCILIATION_INTERVAL_SECS,
    DEFAULT_START_TIMEOUT_SECS, DEFAULT_STOP_TIMEOUT_SECS, MAX_RECONCILIATION_INTERVAL_SECS,
    MAX_TIMEOUT_SECS, MIN_RECONCILIATION_INTERVAL_SECS, MIN_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// The supervised game server: how to drive it and where to find it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Shell command that launches the server (detached)
    pub start_command: String,
    /// Shell command that asks the server to stop
    pub stop_command: String,
    /// Shell command that installs the latest build
    pub update_command: String,
    /// Upper bound for the update command
    pub start_timeout_seconds: u64,
    /// Upper bound for the stop command
    pub stop_timeout_seconds: u64,
    /// Interval between reconciliation ticks
    pub reconciliation_interval_seconds: u64,
    /// Steam application identifier
    pub app_id: u32,
    /// `ip:port` the server registers with the master server list
    pub addr: String,
    /// Seed for the applied version until the state file exists
    pub applied_version: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            start_command: String::new(),
            stop_command: String::new(),
            update_command: String::new(),
            start_timeout_seconds: DEFAULT_START_TIMEOUT_SECS,
            stop_timeout_seconds: DEFAULT_STOP_TIMEOUT_SECS,
            reconciliation_interval_seconds: DEFAULT_RECONCILIATION_INTERVAL_SECS,
            app_id: 0,
            addr: String::new(),
            applied_version: 0,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, command) in [
            ("start_command", &self.start_command),
            ("stop_command", &self.stop_command),
            ("update_command", &self.update_command),
        ] {
            if command.trim().is_empty() {
                return Err(ConfigError::server(format!(
                    "server.{name} must not be empty"
                )));
            }
        }

        Self::validate_range(
            "start_timeout_seconds",
            self.start_timeout_seconds,
            MIN_TIMEOUT_SECS,
            MAX_TIMEOUT_SECS,
        )?;
        Self::validate_range(
            "stop_timeout_seconds",
            self.stop_timeout_seconds,
            MIN_TIMEOUT_SECS,
            MAX_TIMEOUT_SECS,
        )?;
        Self::validate_range(
            "reconciliation_interval_seconds",
            self.reconciliation_interval_seconds,
            MIN_RECONCILIATION_INTERVAL_SECS,
            MAX_RECONCILIATION_INTERVAL_SECS,
        )?;

        if self.app_id == 0 {
            return Err(ConfigError::server("server.app_id must be set"));
        }

        if self.addr.trim().is_empty() {
            return Err(ConfigError::server("server.addr must not be empty"));
        }

        Ok(())
    }

    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.start_timeout_seconds)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_seconds)
    }

    pub fn reconciliation_interval(&self) -> Duration {
        Duration::from_secs(self.reconciliation_interval_seconds)
    }

    fn validate_range(name: &str, value: u64, min: u64, max: u64) -> ConfigErrorResult<()> {
        if value < min || value > max {
            return Err(ConfigError::server(format!(
                "server.{name} must be {min}-{max}, got {value}"
            )));
        }
        Ok(())
    }
}
