//! Sink trait for the writer thread's output destination

use super::{error::Result, log_entry::LogEntry};

/// Where drained entries end up.
///
/// A sink is moved into the writer thread and touched by no other thread
/// until the writer has been joined, so it only needs to be `Send`.
pub trait LogSink: Send {
    /// Write one rendered entry followed by a newline
    fn write_entry(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
