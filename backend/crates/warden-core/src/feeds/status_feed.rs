use crate::feeds::{STATUS_FEED, ServerListResponse, fetch_body, http_client};
use crate::{CoreError, Result, ServerDescriptor};

use async_trait::async_trait;
use warden_config::{FeedConfig, ServerConfig};

/// Live lookup of the supervised server in the master server list.
#[async_trait]
pub trait StatusFeed: Send + Sync {
    /// `None` when the server is not listed (offline).
    async fn lookup(&self) -> Result<Option<ServerDescriptor>>;
}

/// Steam Web API `GetServerList` client filtered to one address and app.
pub struct SteamServerListFeed {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    app_id: u32,
    addr: String,
}

impl SteamServerListFeed {
    pub fn new(feeds: &FeedConfig, server: &ServerConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(feeds.request_timeout())?,
            base_url: feeds.status_feed_url.trim_end_matches('/').to_string(),
            api_key: feeds.api_key_or_empty().to_string(),
            app_id: server.app_id,
            addr: server.addr.clone(),
        })
    }

    /// `\addr\<addr>\appid\<app_id>`
    fn filter(&self) -> String {
        format!("\\addr\\{}\\appid\\{}", self.addr, self.app_id)
    }

    fn url(&self) -> Result<reqwest::Url> {
        let raw = format!("{}/IGameServersService/GetServerList/v1/", self.base_url);
        let filter = self.filter();
        reqwest::Url::parse_with_params(
            &raw,
            [("key", self.api_key.as_str()), ("filter", filter.as_str())],
        )
        .map_err(|e| CoreError::feed_unavailable(STATUS_FEED, format!("bad URL {raw}: {e}")))
    }
}

#[async_trait]
impl StatusFeed for SteamServerListFeed {
    async fn lookup(&self) -> Result<Option<ServerDescriptor>> {
        let body = fetch_body(&self.client, STATUS_FEED, self.url()?).await?;
        ServerListResponse::parse(&body)
    }
}
