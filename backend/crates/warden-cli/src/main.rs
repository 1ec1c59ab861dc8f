//! warden - operator CLI for warden-server
//!
//! # Examples
//!
//! ```bash
//! # Is anyone playing?
//! warden --operator ops-alice status
//!
//! # Update a stopped server
//! WARDEN_OPERATOR_ID=ops-alice warden update
//!
//! # Raw JSON for scripts
//! warden --json versions
//! ```

use warden_cli::Cli;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    warden_cli::run(Cli::parse()).await
}
