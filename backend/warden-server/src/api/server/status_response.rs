use serde::{Deserialize, Serialize};
use warden_core::{ServerDescriptor, ServerStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub address: String,
    pub player_count: u32,
    pub max_players: u32,
}

/// `state` is one of `offline`, `online`, `updating`; `server` is present
/// only when online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerInfo>,
}

impl From<ServerDescriptor> for ServerInfo {
    fn from(d: ServerDescriptor) -> Self {
        Self {
            name: d.name,
            address: d.address,
            player_count: d.player_count,
            max_players: d.max_players,
        }
    }
}

impl From<ServerStatus> for StatusResponse {
    fn from(status: ServerStatus) -> Self {
        match status {
            ServerStatus::Offline => Self {
                state: "offline".to_string(),
                server: None,
            },
            ServerStatus::Online(descriptor) => Self {
                state: "online".to_string(),
                server: Some(descriptor.into()),
            },
            ServerStatus::Updating => Self {
                state: "updating".to_string(),
                server: None,
            },
        }
    }
}
