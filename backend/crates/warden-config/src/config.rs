use crate::{
    ApiConfig, AppliedVersionFile, ConfigError, ConfigErrorResult, FeedConfig, LoggingConfig,
    ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

const CONFIG_DIR_ENV: &str = "WARDEN_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".warden";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub feeds: FeedConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. WARDEN_CONFIG_DIR env var, else ./.warden/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply WARDEN_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse a TOML document without touching the environment.
    pub fn from_toml_str(contents: &str) -> ConfigErrorResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: PathBuf::from("<inline>"),
            source: e,
        })
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: WARDEN_CONFIG_DIR env var > ./.warden/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.feeds.validate()?;
        self.api.validate()?;
        Ok(())
    }

    /// Get bind address for the command API.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Path of the applied version state file.
    pub fn applied_version_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(AppliedVersionFile::path_in(&Self::config_dir()?))
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: app_id={} addr={}",
            self.server.app_id, self.server.addr
        );
        info!(
            "  timeouts: start={}s, stop={}s, reconcile every {}s",
            self.server.start_timeout_seconds,
            self.server.stop_timeout_seconds,
            self.server.reconciliation_interval_seconds
        );
        info!(
            "  feeds: version={}, status={} (api key: {}, timeout={}s)",
            self.feeds.version_feed_url,
            self.feeds.status_feed_url,
            if self.feeds.api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.feeds.request_timeout_seconds
        );
        info!(
            "  api: {} ({} allowed operators)",
            self.bind_addr(),
            self.api.allowed_operators.len()
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("WARDEN_START_COMMAND", &mut self.server.start_command);
        Self::apply_env_string("WARDEN_STOP_COMMAND", &mut self.server.stop_command);
        Self::apply_env_string("WARDEN_UPDATE_COMMAND", &mut self.server.update_command);
        Self::apply_env_parse(
            "WARDEN_START_TIMEOUT_SECS",
            &mut self.server.start_timeout_seconds,
        );
        Self::apply_env_parse(
            "WARDEN_STOP_TIMEOUT_SECS",
            &mut self.server.stop_timeout_seconds,
        );
        Self::apply_env_parse(
            "WARDEN_RECONCILIATION_INTERVAL_SECS",
            &mut self.server.reconciliation_interval_seconds,
        );
        Self::apply_env_parse("WARDEN_APP_ID", &mut self.server.app_id);
        Self::apply_env_string("WARDEN_SERVER_ADDR", &mut self.server.addr);
        Self::apply_env_parse("WARDEN_APPLIED_VERSION", &mut self.server.applied_version);

        // Feeds
        Self::apply_env_string("WARDEN_VERSION_FEED_URL", &mut self.feeds.version_feed_url);
        Self::apply_env_string("WARDEN_STATUS_FEED_URL", &mut self.feeds.status_feed_url);
        Self::apply_env_option_string("WARDEN_STEAM_API_KEY", &mut self.feeds.api_key);
        Self::apply_env_parse(
            "WARDEN_FEED_TIMEOUT_SECS",
            &mut self.feeds.request_timeout_seconds,
        );

        // API
        Self::apply_env_string("WARDEN_API_HOST", &mut self.api.host);
        Self::apply_env_parse("WARDEN_API_PORT", &mut self.api.port);
        if let Ok(val) = std::env::var("WARDEN_API_ALLOWED_OPERATORS") {
            self.api.allowed_operators = ApiConfig::parse_operator_list(&val);
        }

        // Logging
        Self::apply_env_parse("WARDEN_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("WARDEN_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("WARDEN_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("WARDEN_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name)
            && !val.is_empty()
        {
            *target = Some(val);
        }
    }
}
