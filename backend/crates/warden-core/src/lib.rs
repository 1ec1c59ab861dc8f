//! Orchestration core for a supervised game server.
//!
//! The [`ServerController`] is the single owner of the update guard, the
//! process supervisor and the version/occupancy readers. Operator commands
//! and the [`ReconciliationLoop`] both act through it.

pub mod error;
pub mod feeds;
pub mod process;

mod occupancy_checker;
mod outcomes;
mod process_supervisor;
mod reconciliation_loop;
mod server_controller;
mod server_descriptor;
mod server_status;
mod shutdown_coordinator;
mod shutdown_guard;
mod tick_outcome;
mod update_guard;
mod update_permit;
mod version_oracle;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use feeds::{StatusFeed, SteamCmdVersionFeed, SteamServerListFeed, VersionFeed};
pub use occupancy_checker::OccupancyChecker;
pub use outcomes::{StartOutcome, StopOutcome, UpdateOutcome, VersionsReport};
pub use process::{ProcessLauncher, RunOutcome, ShellLauncher};
pub use process_supervisor::{BoundedRun, ProcessSupervisor, UpdateReport};
pub use reconciliation_loop::ReconciliationLoop;
pub use server_controller::ServerController;
pub use server_descriptor::ServerDescriptor;
pub use server_status::ServerStatus;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use tick_outcome::TickOutcome;
pub use update_guard::UpdateGuard;
pub use update_permit::UpdatePermit;
pub use version_oracle::VersionOracle;

/// Upstream build identifier (Steam change number).
pub type VersionId = u64;
