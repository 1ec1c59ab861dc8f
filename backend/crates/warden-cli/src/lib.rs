//! warden-cli library
//!
//! HTTP client and output rendering for the `warden` operator command.

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod render;


pub use cli::Cli;
pub use client::client::OPERATOR_ID_HEADER;
pub use client::{CliClientResult, Client, ClientError};
pub use commands::Commands;
pub use render::{Rendered, render_error, render_response};

use std::process::ExitCode;

use serde_json::{Value, json};

/// Send `cli.command` and print the result. Exit code follows the outcome.
pub async fn run(cli: Cli) -> ExitCode {
    let server_url = cli.server_url();
    let client = Client::new(&server_url, cli.operator.as_deref());

    let (rendered, raw) = match cli.command.send(&client).await {
        Ok(body) => (render_response(cli.command, &body), body),
        Err(e) => {
            let raw = match &e {
                ClientError::Api { code, message, .. } => {
                    json!({ "error": { "code": code, "message": message } })
                }
                other => json!({ "error": { "code": "CLIENT_ERROR", "message": other.to_string() } }),
            };
            (render_error(&e, &server_url), raw)
        }
    };

    if cli.json {
        print_json(&raw);
    } else if rendered.success {
        println!("{}", rendered.line);
    } else {
        eprintln!("{}", rendered.line);
    }

    if rendered.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing response: {}", e),
    }
}
