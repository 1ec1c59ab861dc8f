use crate::feeds::{AppInfoResponse, VERSION_FEED, fetch_body, http_client};
use crate::{CoreError, Result, VersionId};

use async_trait::async_trait;
use warden_config::{FeedConfig, ServerConfig};

/// Source of the latest upstream build.
#[async_trait]
pub trait VersionFeed: Send + Sync {
    async fn latest_version(&self) -> Result<VersionId>;
}

/// SteamCMD info API client (`{base}/v1/info/{app_id}`).
pub struct SteamCmdVersionFeed {
    client: reqwest::Client,
    base_url: String,
    app_id: u32,
}

impl SteamCmdVersionFeed {
    pub fn new(feeds: &FeedConfig, server: &ServerConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(feeds.request_timeout())?,
            base_url: feeds.version_feed_url.trim_end_matches('/').to_string(),
            app_id: server.app_id,
        })
    }

    fn url(&self) -> Result<reqwest::Url> {
        let raw = format!("{}/v1/info/{}", self.base_url, self.app_id);
        reqwest::Url::parse(&raw)
            .map_err(|e| CoreError::feed_unavailable(VERSION_FEED, format!("bad URL {raw}: {e}")))
    }
}

#[async_trait]
impl VersionFeed for SteamCmdVersionFeed {
    async fn latest_version(&self) -> Result<VersionId> {
        let body = fetch_body(&self.client, VERSION_FEED, self.url()?).await?;
        let version = AppInfoResponse::parse(&body, self.app_id)?;
        log::debug!("Upstream version for app {}: {version}", self.app_id);
        Ok(version)
    }
}
