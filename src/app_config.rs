use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module holds the runtime settings assembled from CLI arguments;
/// the tool itself reads no configuration file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Override for the number of concurrent conversion tasks.
    /// Defaults to the host's available parallelism when unset.
    #[serde(default)]
    pub max_concurrent_tasks: Option<usize>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.max_concurrent_tasks {
            if workers == 0 {
                return Err(anyhow!("max_concurrent_tasks must be at least 1"));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            max_concurrent_tasks: None,
        }
    }
}

/// Log level setting
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}
