mod api_config;
mod applied_version_file;
mod config;
mod error;
mod feed_config;
mod log_level;
mod logging_config;
mod server_config;


pub use api_config::ApiConfig;
pub use applied_version_file::AppliedVersionFile;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use feed_config::FeedConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

// Game server
const DEFAULT_START_TIMEOUT_SECS: u64 = 600;
const DEFAULT_STOP_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RECONCILIATION_INTERVAL_SECS: u64 = 300;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 86_400;
const MIN_RECONCILIATION_INTERVAL_SECS: u64 = 10;
const MAX_RECONCILIATION_INTERVAL_SECS: u64 = 86_400;

// Upstream feeds
const DEFAULT_VERSION_FEED_URL: &str = "https://api.steamcmd.net";
const DEFAULT_STATUS_FEED_URL: &str = "https://api.steampowered.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

// Command API
const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8750;
const MIN_PORT: u16 = 1024;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
