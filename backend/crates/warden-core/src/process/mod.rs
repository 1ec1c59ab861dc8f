//! Process capability used by the supervisor.

mod process_launcher;
mod run_outcome;
mod shell_launcher;

pub use process_launcher::ProcessLauncher;
pub use run_outcome::RunOutcome;
pub use shell_launcher::ShellLauncher;
