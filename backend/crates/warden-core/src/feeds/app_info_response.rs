use crate::{CoreError, Result, VersionId, feeds::VERSION_FEED};

use std::collections::HashMap;

use serde::Deserialize;

const SUCCESS_STATUS: &str = "success";

/// `GET /v1/info/{app_id}` body from the SteamCMD info API.
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: HashMap<String, AppInfoEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoEntry {
    #[serde(rename = "_change_number", default)]
    pub change_number: Option<VersionId>,
}

impl AppInfoResponse {
    /// Validating parse: yields the change number for `app_id` or `FeedMalformed`.
    pub fn parse(body: &[u8], app_id: u32) -> Result<VersionId> {
        let response: AppInfoResponse = serde_json::from_slice(body)
            .map_err(|e| CoreError::feed_malformed(VERSION_FEED, e.to_string()))?;
        response.change_number(app_id)
    }

    pub fn change_number(&self, app_id: u32) -> Result<VersionId> {
        if let Some(status) = &self.status
            && status != SUCCESS_STATUS
        {
            return Err(CoreError::feed_unavailable(
                VERSION_FEED,
                format!("upstream status '{status}'"),
            ));
        }

        let entry = self.data.get(&app_id.to_string()).ok_or_else(|| {
            CoreError::feed_malformed(VERSION_FEED, format!("no entry for app {app_id}"))
        })?;

        entry.change_number.ok_or_else(|| {
            CoreError::feed_malformed(
                VERSION_FEED,
                format!("entry for app {app_id} has no _change_number"),
            )
        })
    }
}
