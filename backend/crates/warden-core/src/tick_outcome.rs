use crate::VersionId;

use std::fmt;

/// What one reconciliation tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    UpToDate,
    FeedUnavailable,
    Occupied { players: u32 },
    GuardHeld,
    /// `version` is `None` when the new version could not be confirmed.
    Completed { version: Option<VersionId> },
    Failed { reason: String },
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => write!(f, "up to date"),
            Self::FeedUnavailable => write!(f, "version feed unavailable"),
            Self::Occupied { players } => write!(f, "{players} players online, update deferred"),
            Self::GuardHeld => write!(f, "another update in progress"),
            Self::Completed {
                version: Some(version),
            } => write!(f, "updated to {version}"),
            Self::Completed { version: None } => write!(f, "updated (version unconfirmed)"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}
