pub mod error;
pub mod extractors;
pub mod server;

pub use server::server::{server_status, server_versions, start_server, stop_server, update_server};
