//! Active/standby buffer pair
//!
//! Producers append into the active buffer. When it fills, the standby
//! (empty) buffer becomes active and the full one is handed to the writer.
//! Roles are exchanged by moving owned `Buffer` values, never by copying
//! entries. While the writer holds a buffer the standby slot is `None`.
//!
//! None of these types lock anything themselves; the engine keeps the pair
//! behind its state mutex.

use super::log_entry::LogEntry;
use std::mem;

/// Result of appending to a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Accepted,
    /// The append filled the buffer; it must be handed off before the next
    /// append.
    Full,
}

/// A fixed-capacity run of entries in submission order
///
/// `len()` is the write cursor: entries `[0, len)` are valid.
#[derive(Debug)]
pub struct Buffer {
    entries: Vec<LogEntry>,
    capacity: usize,
}

impl Buffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Same capacity, no allocation until first use
    fn placeholder(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn append(&mut self, entry: LogEntry) -> AppendOutcome {
        self.entries.push(entry);
        if self.entries.len() >= self.capacity {
            AppendOutcome::Full
        } else {
            AppendOutcome::Accepted
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Yield every valid entry in submission order and leave the cursor at 0
    pub fn drain(&mut self) -> std::vec::Drain<'_, LogEntry> {
        self.entries.drain(..)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug)]
pub struct DoubleBuffer {
    active: Buffer,
    standby: Option<Buffer>,
    capacity: usize,
}

impl DoubleBuffer {
    pub fn new(capacity: usize) -> Self {
        let active = Buffer::with_capacity(capacity);
        let capacity = active.capacity();
        Self {
            active,
            standby: Some(Buffer::with_capacity(capacity)),
            capacity,
        }
    }

    #[inline]
    pub fn append(&mut self, entry: LogEntry) -> AppendOutcome {
        self.active.append(entry)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn active(&self) -> &Buffer {
        &self.active
    }

    #[inline]
    pub fn is_active_full(&self) -> bool {
        self.active.is_full()
    }

    /// False while the writer still owns the other buffer
    #[inline]
    pub fn has_standby(&self) -> bool {
        self.standby.is_some()
    }

    /// Promote the standby to active and return the previous active buffer.
    ///
    /// Returns `None`, changing nothing, when the standby is still with the
    /// writer.
    pub fn swap_and_reset(&mut self) -> Option<Buffer> {
        let standby = self.standby.take()?;
        Some(self.install_active(standby))
    }

    /// Like [`swap_and_reset`](Self::swap_and_reset) but allocates a new
    /// active buffer when no standby is available.
    pub fn swap_or_allocate(&mut self) -> Buffer {
        let fresh = self
            .standby
            .take()
            .unwrap_or_else(|| Buffer::with_capacity(self.capacity));
        self.install_active(fresh)
    }

    /// Make `buffer` the active one (after resetting it) and return the old
    /// active buffer.
    pub fn install_active(&mut self, mut buffer: Buffer) -> Buffer {
        buffer.reset();
        mem::replace(&mut self.active, buffer)
    }

    /// Accept a drained buffer back from the writer.
    ///
    /// Extra buffers allocated by [`swap_or_allocate`](Self::swap_or_allocate)
    /// are dropped once a standby is already present.
    pub fn recycle(&mut self, mut buffer: Buffer) {
        if self.standby.is_none() && buffer.capacity() == self.capacity {
            buffer.reset();
            self.standby = Some(buffer);
        }
    }

    /// Remove whatever is in the active buffer, for the shutdown drain
    pub fn take_active(&mut self) -> Buffer {
        mem::replace(&mut self.active, Buffer::placeholder(self.capacity))
    }
}
