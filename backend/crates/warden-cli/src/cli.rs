use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(about = "Operate a warden-supervised game server")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// warden-server URL (default http://127.0.0.1:8750)
    #[arg(long, global = true, env = "WARDEN_SERVER_URL")]
    pub server: Option<String>,

    /// Operator identity sent as X-Operator-Id
    #[arg(long, global = true, env = "WARDEN_OPERATOR_ID")]
    pub operator: Option<String>,

    /// Print the raw JSON response instead of a message
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    pub fn server_url(&self) -> String {
        self.server
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", warden_config::DEFAULT_PORT))
    }
}
