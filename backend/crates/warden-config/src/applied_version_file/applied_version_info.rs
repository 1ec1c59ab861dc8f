//! Persisted record of the last successfully deployed build.
//!
//! File location: `<config_dir>/applied_version.json`
//!
//! Writes go to a sibling temp file which is then renamed over the target,
//! so a crash mid-write leaves either the old or the new record, never a
//! truncated one. A leftover temp file is ignored by `read_in()`.

use crate::{ConfigError, ConfigErrorResult};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APPLIED_VERSION_FILENAME: &str = "applied_version.json";
const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedVersionFile {
    /// Upstream change number of the deployed build
    pub version: u64,
    /// RFC 3339 timestamp of when the version was recorded
    pub recorded_at: String,
}

impl AppliedVersionFile {
    pub fn new(version: u64) -> Self {
        Self {
            version,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns `<config_dir>/applied_version.json`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(APPLIED_VERSION_FILENAME)
    }

    /// Read the state file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn read_in(config_dir: &Path) -> ConfigErrorResult<Option<Self>> {
        Self::read_from(&Self::path_in(config_dir))
    }

    pub fn read_from(path: &Path) -> ConfigErrorResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let info = serde_json::from_str(&content).map_err(|e| ConfigError::VersionFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Some(info))
    }

    /// Stored version, or `seed` when no state file has been written yet.
    pub fn load_or_seed(path: &Path, seed: u64) -> ConfigErrorResult<u64> {
        Ok(Self::read_from(path)?.map_or(seed, |info| info.version))
    }

    /// Atomically record `version` in the config directory.
    pub fn write_in(config_dir: &Path, version: u64) -> ConfigErrorResult<Self> {
        let info = Self::new(version);
        info.write_to(&Self::path_in(config_dir))?;
        Ok(info)
    }

    /// Atomically write this record to `path` (temp file + rename).
    pub fn write_to(&self, path: &Path) -> ConfigErrorResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::config(format!("Failed to serialize applied version: {e}"))
        })?;

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, content).map_err(|e| ConfigError::Io {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            std::fs::remove_file(&temp_path).ok();
            ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }
}
