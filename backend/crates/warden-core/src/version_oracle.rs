use crate::feeds::VersionFeed;
use crate::{CoreError, Result, VersionId};

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::info;
use tokio::sync::Mutex;
use warden_config::AppliedVersionFile;

/// Resolves the upstream version and the locally applied one.
pub struct VersionOracle {
    feed: Arc<dyn VersionFeed>,
    state_path: PathBuf,
    applied: AtomicU64,
    write_lock: Mutex<()>,
}

impl VersionOracle {
    /// Read the state file at `state_path`, falling back to `seed` when it
    /// does not exist yet. A corrupt state file is an error.
    pub fn new(feed: Arc<dyn VersionFeed>, state_path: PathBuf, seed: VersionId) -> Result<Self> {
        let applied =
            AppliedVersionFile::load_or_seed(&state_path, seed).map_err(CoreError::persist)?;
        info!(
            "Applied version {applied} (state file {})",
            state_path.display()
        );

        Ok(Self {
            feed,
            state_path,
            applied: AtomicU64::new(applied),
            write_lock: Mutex::new(()),
        })
    }

    pub async fn remote_version(&self) -> Result<VersionId> {
        self.feed.latest_version().await
    }

    pub fn applied_version(&self) -> VersionId {
        self.applied.load(Ordering::Acquire)
    }

    /// Persist `version` (temp file + rename), then publish it in memory.
    pub async fn record_applied_version(&self, version: VersionId) -> Result<()> {
        let _write = self.write_lock.lock().await;

        let path = self.state_path.clone();
        let record = AppliedVersionFile::new(version);
        tokio::task::spawn_blocking(move || record.write_to(&path))
            .await
            .map_err(|e| {
                CoreError::persist(warden_config::ConfigError::config(format!(
                    "state file writer task failed: {e}"
                )))
            })?
            .map_err(CoreError::persist)?;

        let previous = self.applied.swap(version, Ordering::AcqRel);
        info!("Applied version {previous} -> {version}");
        Ok(())
    }
}
