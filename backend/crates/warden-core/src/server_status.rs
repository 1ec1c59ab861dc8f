use crate::ServerDescriptor;

use serde::Serialize;

/// Derived per query from the status feed and the update guard. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ServerStatus {
    Offline,
    Online(ServerDescriptor),
    Updating,
}
