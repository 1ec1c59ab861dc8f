mod command_response;
mod error;
