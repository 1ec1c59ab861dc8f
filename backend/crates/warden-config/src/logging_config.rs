use crate::{DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_LEVEL, LogLevel};

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Colored stdout output (ignored when logging to a file)
    pub colored: bool,
    pub dir: String,
    /// Log file name inside `dir`; stdout when unset
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: true,
            dir: String::from(DEFAULT_LOG_DIRECTORY),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Resolve the log file path against the config directory.
    ///
    /// Relative `dir` values are placed under `config_dir`.
    pub fn file_path(&self, config_dir: &Path) -> Option<PathBuf> {
        let file = self.file.as_ref()?;
        let dir = Path::new(&self.dir);
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            config_dir.join(dir)
        };
        Some(dir.join(file))
    }
}
