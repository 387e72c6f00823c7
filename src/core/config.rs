//! Logger configuration
//!
//! A [`LoggerConfig`] can be written by hand or loaded from JSON:
//!
//! ```json
//! {
//!   "directory": "/var/log/myapp",
//!   "threshold": "WARNING",
//!   "queue_capacity": 512,
//!   "console": true,
//!   "colors": false,
//!   "format": "tagged"
//! }
//! ```
//!
//! Only `directory` is required. `threshold` accepts a level name or a raw
//! value; `0` or below silences the logger.

use super::error::{LoggerError, Result};
use super::log_level::Threshold;
use super::logger::DEFAULT_QUEUE_CAPACITY;
use super::output_format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory the log file is created in
    pub directory: PathBuf,

    #[serde(default)]
    pub threshold: Threshold,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Mirror lines to the console
    #[serde(default = "default_true")]
    pub console: bool,

    #[serde(default = "default_true")]
    pub colors: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_true() -> bool {
    true
}

impl LoggerConfig {
    /// Configuration with default settings for the given directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            threshold: Threshold::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            console: true,
            colors: true,
            format: OutputFormat::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger config",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "directory is empty"));
        }
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "queue_capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}
