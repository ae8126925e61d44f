//! Engine configuration
//!
//! Everything is fixed at launch. There is no environment or command-line
//! layer; the embedding application builds an [`EngineConfig`] in code or
//! deserializes one from its own configuration file.

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    overflow_policy::OverflowPolicy,
    timestamp::ClockSource,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Slots per buffer when nothing else is configured
pub const DEFAULT_BUFFER_CAPACITY: usize = 10;

fn default_buffer_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

/// # Example
///
/// ```
/// use rust_swap_logger::prelude::*;
///
/// let config = EngineConfig::from_json_str(
///     r#"{ "path": "app.log", "min_level": "warn", "buffer_capacity": 64 }"#,
/// )
/// .unwrap();
/// assert_eq!(config.min_level, LogLevel::Warn);
/// assert_eq!(config.overflow_policy, OverflowPolicy::Grow);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log file, opened in append mode
    pub path: PathBuf,
    #[serde(default)]
    pub min_level: LogLevel,
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
    #[serde(default)]
    pub clock: ClockSource,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            min_level: LogLevel::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            clock: ClockSource::default(),
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(LoggerError::config(
                "EngineConfig",
                "buffer_capacity must be at least 1",
            ));
        }
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::config("EngineConfig", "path must not be empty"));
        }
        Ok(())
    }
}
