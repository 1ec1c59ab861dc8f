//! Typed clients for the upstream version and server-list feeds.

mod app_info_response;
mod server_list_response;
mod status_feed;
mod version_feed;

pub use app_info_response::{AppInfoEntry, AppInfoResponse};
pub use server_list_response::{ServerListBody, ServerListEntry, ServerListResponse};
pub use status_feed::{StatusFeed, SteamServerListFeed};
pub use version_feed::{SteamCmdVersionFeed, VersionFeed};

use crate::{CoreError, Result};

use std::time::Duration;

pub(crate) const VERSION_FEED: &str = "Version";
pub(crate) const STATUS_FEED: &str = "Status";

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(1)
        .build()
        .map_err(|e| CoreError::feed_unavailable("HTTP", format!("cannot build client: {e}")))
}

/// Fetch `url` and return the body of a 2xx response.
///
/// Transport errors and non-2xx statuses are both `FeedUnavailable`.
pub(crate) async fn fetch_body(
    client: &reqwest::Client,
    feed: &'static str,
    url: reqwest::Url,
) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CoreError::feed_unavailable(feed, e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CoreError::feed_unavailable(feed, format!("HTTP {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| CoreError::feed_unavailable(feed, e.without_url().to_string()))?;

    Ok(body.to_vec())
}
