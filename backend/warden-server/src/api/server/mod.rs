pub mod command_response;
pub mod server;
pub mod status_response;
pub mod versions_response;
