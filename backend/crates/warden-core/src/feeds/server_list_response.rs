use crate::{CoreError, Result, ServerDescriptor, feeds::STATUS_FEED};

use serde::Deserialize;

/// `IGameServersService/GetServerList/v1` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerListResponse {
    #[serde(default)]
    pub response: Option<ServerListBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerListBody {
    #[serde(default)]
    pub servers: Vec<ServerListEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerListEntry {
    #[serde(default)]
    pub name: String,
    pub addr: String,
    #[serde(default)]
    pub players: u32,
    #[serde(default)]
    pub max_players: u32,
}

impl ServerListResponse {
    /// Validating parse. An empty or absent list means the server is offline.
    pub fn parse(body: &[u8]) -> Result<Option<ServerDescriptor>> {
        let response: ServerListResponse = serde_json::from_slice(body)
            .map_err(|e| CoreError::feed_malformed(STATUS_FEED, e.to_string()))?;
        Ok(response.first_server())
    }

    pub fn first_server(self) -> Option<ServerDescriptor> {
        self.response?
            .servers
            .into_iter()
            .next()
            .map(ServerDescriptor::from)
    }
}

impl From<ServerListEntry> for ServerDescriptor {
    fn from(entry: ServerListEntry) -> Self {
        Self {
            name: entry.name,
            address: entry.addr,
            player_count: entry.players,
            max_players: entry.max_players,
        }
    }
}
