//! Log entry structure

use super::log_level::LogLevel;
use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One accepted message. Immutable once built; owned by exactly one buffer
/// slot at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: Timestamp,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that every entry occupies exactly one line of the file.
    fn sanitize_message(message: String) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message;
        }
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.into()),
            timestamp,
        }
    }

    /// The line as written to the file, without the trailing newline
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.timestamp, self.level, self.message)
    }
}
