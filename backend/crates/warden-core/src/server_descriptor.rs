use serde::Serialize;

/// A listing of the supervised server in the master server list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerDescriptor {
    pub name: String,
    pub address: String,
    pub player_count: u32,
    pub max_players: u32,
}
