use crate::{ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT, MIN_PORT};

use serde::Deserialize;

/// Operator command API served by the daemon
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Operator identifiers permitted to issue commands
    pub allowed_operators: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            allowed_operators: Vec::new(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 lets the OS pick
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::api(format!(
                "api.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::api("api.host must not be empty"));
        }

        Ok(())
    }

    pub fn is_allowed(&self, operator_id: &str) -> bool {
        self.allowed_operators.iter().any(|id| id == operator_id)
    }

    /// Comma separated list, as accepted from `WARDEN_API_ALLOWED_OPERATORS`.
    pub(crate) fn parse_operator_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }
}
