use crate::process::{ProcessLauncher, RunOutcome};
use crate::{CoreError, Result};

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::process::Command;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;

/// Runs commands through the platform shell (`sh -c` / `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLauncher;

impl ShellLauncher {
    pub fn new() -> Self {
        Self
    }

    fn shell(command: &str) -> Command {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        };

        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

#[async_trait]
impl ProcessLauncher for ShellLauncher {
    async fn spawn_detached(&self, command: &str) -> Result<u32> {
        let mut cmd = Self::shell(command);

        // Own process group so the server outlives the daemon and never
        // receives our terminal signals.
        #[cfg(unix)]
        cmd.process_group(0);

        #[cfg(windows)]
        cmd.creation_flags(DETACHED_PROCESS);

        let child = cmd
            .spawn()
            .map_err(|e| CoreError::process_spawn(command, e))?;

        let pid = child.id().ok_or_else(|| {
            CoreError::process_spawn(
                command,
                std::io::Error::other("process exited before its PID could be read"),
            )
        })?;

        info!("Launched '{command}' detached with PID {pid}");

        // Detached: the runtime reaps it if it exits, we never wait on it.
        drop(child);

        Ok(pid)
    }

    async fn run_bounded(&self, command: &str, timeout: Duration) -> Result<RunOutcome> {
        let mut cmd = Self::shell(command);
        cmd.kill_on_drop(true);

        // Leader of its own group so a timeout can take the whole tree down.
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd
            .spawn()
            .map_err(|e| CoreError::process_spawn(command, e))?;

        debug!(
            "Running '{command}' (pid {:?}, timeout {}s)",
            child.id(),
            timeout.as_secs()
        );

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => {
                debug!("'{command}' exited with {status}");
                Ok(RunOutcome::Exited {
                    code: status.code(),
                })
            }
            Ok(Err(e)) => Err(CoreError::process_wait(command, e)),
            Err(_) => {
                warn!(
                    "'{command}' did not finish within {}s, killing it",
                    timeout.as_secs()
                );
                #[cfg(unix)]
                if let Some(pid) = child.id() {
                    kill_group(command, pid);
                }
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill '{command}': {e}");
                }
                Ok(RunOutcome::TimedOut)
            }
        }
    }
}

#[cfg(unix)]
fn kill_group(command: &str, pid: u32) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        warn!("Failed to kill process group of '{command}': {e}");
    }
}
