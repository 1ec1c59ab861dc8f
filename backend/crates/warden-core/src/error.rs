use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;
use warden_config::ConfigError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{feed} feed unavailable: {message} {location}")]
    FeedUnavailable {
        feed: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("{feed} feed returned a malformed response: {message} {location}")]
    FeedMalformed {
        feed: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to spawn '{command}': {source} {location}")]
    ProcessSpawn {
        command: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed waiting on '{command}': {source} {location}")]
    ProcessWait {
        command: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Another server command is still running {location}")]
    ProcessBusy { location: ErrorLocation },

    #[error("Failed to persist applied version: {source} {location}")]
    Persist {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("An update is already in progress {location}")]
    UpdateInProgress { location: ErrorLocation },
}

impl CoreError {
    #[track_caller]
    pub fn feed_unavailable(feed: &'static str, message: impl Into<String>) -> Self {
        Self::FeedUnavailable {
            feed,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn feed_malformed(feed: &'static str, message: impl Into<String>) -> Self {
        Self::FeedMalformed {
            feed,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_spawn(command: &str, source: std::io::Error) -> Self {
        Self::ProcessSpawn {
            command: command.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_wait(command: &str, source: std::io::Error) -> Self {
        Self::ProcessWait {
            command: command.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_busy() -> Self {
        Self::ProcessBusy {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn persist(source: ConfigError) -> Self {
        Self::Persist {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn update_in_progress() -> Self {
        Self::UpdateInProgress {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Upstream feed hiccups; the loop skips the tick instead of surfacing them.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::FeedUnavailable { .. } | Self::FeedMalformed { .. }
        )
    }
}

pub type Result<T> = StdResult<T, CoreError>;
