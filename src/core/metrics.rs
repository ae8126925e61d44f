//! Logger metrics for observability
//!
//! Counters describing what happened to submitted messages and how often
//! the double buffer swapped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for engine observability
///
/// # Example
///
/// ```
/// use rust_swap_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_accepted();
/// metrics.record_written();
///
/// assert_eq!(metrics.accepted_count(), 1);
/// assert_eq!(metrics.written_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries appended to a buffer
    accepted: AtomicU64,

    /// Entries below the minimum level
    filtered: AtomicU64,

    /// Entries submitted while the engine was not running
    rejected: AtomicU64,

    /// Entries handed to the sink successfully
    written: AtomicU64,

    /// Entries the sink failed to write
    write_failures: AtomicU64,

    /// Active/standby swaps
    swaps: AtomicU64,

    /// Extra buffers allocated because the standby was still draining
    grow_events: AtomicU64,

    /// Times a producer waited for the writer to return the standby
    block_events: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            swaps: AtomicU64::new(0),
            grow_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failure_count(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn swap_count(&self) -> u64 {
        self.swaps.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn grow_events(&self) -> u64 {
        self.grow_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_swap(&self) -> u64 {
        self.swaps.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_grow(&self) -> u64 {
        self.grow_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Accepted entries not yet handed to the sink
    ///
    /// Zero after a clean `terminate`.
    pub fn pending(&self) -> u64 {
        self.accepted_count()
            .saturating_sub(self.written_count() + self.write_failure_count())
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.swaps.store(0, Ordering::Relaxed);
        self.grow_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            accepted: AtomicU64::new(self.accepted_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            rejected: AtomicU64::new(self.rejected_count()),
            written: AtomicU64::new(self.written_count()),
            write_failures: AtomicU64::new(self.write_failure_count()),
            swaps: AtomicU64::new(self.swap_count()),
            grow_events: AtomicU64::new(self.grow_events()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}
