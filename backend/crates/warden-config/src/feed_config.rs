use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STATUS_FEED_URL,
    DEFAULT_VERSION_FEED_URL, MAX_REQUEST_TIMEOUT_SECS, MIN_REQUEST_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Upstream HTTP feeds for the latest build and the live server list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub version_feed_url: String,
    pub status_feed_url: String,
    /// Steam Web API key (secret)
    pub api_key: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            version_feed_url: String::from(DEFAULT_VERSION_FEED_URL),
            status_feed_url: String::from(DEFAULT_STATUS_FEED_URL),
            api_key: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, url) in [
            ("version_feed_url", &self.version_feed_url),
            ("status_feed_url", &self.status_feed_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::feed(format!(
                    "feeds.{name} must start with http:// or https://, got '{url}'"
                )));
            }
        }

        if self.request_timeout_seconds < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_seconds > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::feed(format!(
                "feeds.request_timeout_seconds must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_seconds
            )));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Key value sent to the status feed; empty when unset.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
