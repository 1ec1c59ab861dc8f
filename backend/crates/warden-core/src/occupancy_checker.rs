use crate::feeds::StatusFeed;
use crate::{Result, ServerDescriptor};

use std::sync::Arc;

use log::warn;

/// Reads the live player count of the supervised server.
#[derive(Clone)]
pub struct OccupancyChecker {
    feed: Arc<dyn StatusFeed>,
}

impl OccupancyChecker {
    pub fn new(feed: Arc<dyn StatusFeed>) -> Self {
        Self { feed }
    }

    /// Current players, or `0` when the status feed cannot be read.
    ///
    /// Unlike the version feed, a status outage does not block automatic
    /// updates.
    pub async fn player_count(&self) -> u32 {
        match self.feed.lookup().await {
            Ok(Some(server)) => server.player_count,
            Ok(None) => 0,
            Err(e) => {
                warn!("Status feed unavailable, assuming no players: {e}");
                0
            }
        }
    }

    /// Raw lookup; errors propagate.
    pub async fn server_descriptor(&self) -> Result<Option<ServerDescriptor>> {
        self.feed.lookup().await
    }
}
