//! What a producer does when the active buffer fills while the standby
//! buffer is still being drained by the writer.
//!
//! Neither policy drops entries. They differ only in whether the producer
//! may wait on the writer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// # Example
///
/// ```
/// use rust_swap_logger::OverflowPolicy;
///
/// // Default behavior: allocate another buffer, never wait
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Grow);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Allocate a fresh buffer and keep going
    ///
    /// Producers never wait for file I/O. Memory grows with the writer's
    /// backlog until it catches up.
    #[default]
    Grow,

    /// Wait until the writer hands the standby buffer back
    ///
    /// Memory stays at exactly two buffers, at the cost of producer latency
    /// when the writer falls behind.
    Block,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Grow => write!(f, "Grow"),
            OverflowPolicy::Block => write!(f, "Block"),
        }
    }
}
