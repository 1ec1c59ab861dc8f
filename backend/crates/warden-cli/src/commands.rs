use crate::{CliClientResult, Client};

use clap::Subcommand;
use serde_json::Value;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the game server
    Start,

    /// Stop the game server
    Stop,

    /// Update a stopped game server to the latest upstream build
    Update,

    /// Show whether the server is online, offline or updating
    Status,

    /// Show applied and latest upstream versions
    Versions,

    /// Shut down the warden daemon
    Shutdown,
}

impl Commands {
    pub(crate) async fn send(self, client: &Client) -> CliClientResult<Value> {
        match self {
            Commands::Start => client.start().await,
            Commands::Stop => client.stop().await,
            Commands::Update => client.update().await,
            Commands::Status => client.status().await,
            Commands::Versions => client.versions().await,
            Commands::Shutdown => client.shutdown().await,
        }
    }
}
