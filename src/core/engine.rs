//! Engine lifecycle and the producer path
//!
//! Producers filter, stamp and append under one mutex. The producer whose
//! append fills the active buffer swaps it with the standby and queues it
//! for the writer before releasing that mutex, so channel order is fill
//! order and no other producer can slip an entry in between.

use super::{
    config::EngineConfig,
    double_buffer::{AppendOutcome, Buffer, DoubleBuffer},
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::{LogLevel, SeverityFilter},
    metrics::LoggerMetrics,
    overflow_policy::OverflowPolicy,
    sink::LogSink,
    timestamp::{ClockSource, Timestamp},
    writer::{drain_into, panic_message, WriterSignal, WriterWorker},
};
use crate::sinks::FileSink;
use crossbeam_channel::{unbounded, Sender};
use parking_lot::{Condvar, Mutex};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Never started, or the log file could not be opened
    NotStarted,
    Running,
    /// `terminate` is draining
    Stopping,
    Stopped,
}

/// State shared between producers, the writer and `terminate`
pub(crate) struct Shared {
    state: Mutex<BufferState>,
    /// Notified whenever the writer returns a buffer or shutdown begins
    buffer_returned: Condvar,
    metrics: Arc<LoggerMetrics>,
}

struct BufferState {
    lifecycle: EngineState,
    buffers: DoubleBuffer,
    signals: Sender<WriterSignal>,
}

impl Shared {
    fn new(capacity: usize, signals: Sender<WriterSignal>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            state: Mutex::new(BufferState {
                lifecycle: EngineState::NotStarted,
                buffers: DoubleBuffer::new(capacity),
                signals,
            }),
            buffer_returned: Condvar::new(),
            metrics,
        }
    }

    /// Called by the writer once it has drained `buffer`
    pub(crate) fn recycle(&self, buffer: Buffer) {
        {
            let mut state = self.state.lock();
            if state.lifecycle == EngineState::Running && state.buffers.is_active_full() {
                // A blocked hand-off was waiting for this buffer
                let full = state.buffers.install_active(buffer);
                Self::dispatch(&mut state, full, &self.metrics);
            } else {
                state.buffers.recycle(buffer);
            }
        }
        self.buffer_returned.notify_all();
    }

    /// Queue a full buffer for the writer. Must be called with the state
    /// lock held.
    fn dispatch(state: &mut BufferState, full: Buffer, metrics: &LoggerMetrics) {
        metrics.record_swap();
        if let Err(err) = state.signals.send(WriterSignal::BufferReady(full)) {
            if let WriterSignal::BufferReady(lost) = err.into_inner() {
                for _ in 0..lost.len() {
                    metrics.record_write_failure();
                }
                eprintln!(
                    "[LOGGER ERROR] Writer thread is gone, {} entries could not be written",
                    lost.len()
                );
            }
        }
    }
}

struct EngineCore {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<Box<dyn LogSink>>>>,
}

/// An asynchronous file logger.
///
/// `log` never touches the file. Entries collect in the active buffer and
/// are written by a single background thread each time a buffer fills, and
/// once more by `terminate` for whatever is left.
///
/// # Example
///
/// ```no_run
/// use rust_swap_logger::prelude::*;
///
/// let engine = Engine::launch("app.log", LogLevel::Info);
/// for i in 0..100 {
///     engine.info(format!("yes! {}", i));
/// }
/// engine.terminate();
/// ```
pub struct Engine {
    config: EngineConfig,
    filter: SeverityFilter,
    metrics: Arc<LoggerMetrics>,
    core: Option<EngineCore>,
}

impl Engine {
    /// Open `path` and start the writer.
    ///
    /// Never fails: if the file cannot be opened the engine stays in
    /// [`EngineState::NotStarted`] and every log call is dropped silently.
    pub fn launch(path: impl Into<PathBuf>, min_level: LogLevel) -> Self {
        Self::launch_with(EngineConfig::new(path).with_min_level(min_level))
    }

    /// [`launch`](Self::launch) with a full configuration
    pub fn launch_with(config: EngineConfig) -> Self {
        match Self::try_launch(config.clone()) {
            Ok(engine) => engine,
            Err(_) => Self::not_started(config),
        }
    }

    /// Like [`launch_with`](Self::launch_with), but reports why the engine
    /// could not start.
    pub fn try_launch(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let sink = FileSink::open(&config.path)?;
        Self::with_sink(config, Box::new(sink))
    }

    /// Start the writer on a caller-supplied sink. `config.path` is ignored.
    pub fn with_sink(config: EngineConfig, sink: Box<dyn LogSink>) -> Result<Self> {
        if config.buffer_capacity == 0 {
            return Err(LoggerError::config(
                "EngineConfig",
                "buffer_capacity must be at least 1",
            ));
        }

        let (sender, receiver) = unbounded();
        let metrics = Arc::new(LoggerMetrics::new());
        let shared = Arc::new(Shared::new(
            config.buffer_capacity,
            sender,
            Arc::clone(&metrics),
        ));

        let handle = WriterWorker::new(receiver, sink, Arc::clone(&shared), Arc::clone(&metrics))
            .spawn()
            .map_err(|e| {
                LoggerError::io_operation("spawning writer thread", "cannot start writer", e)
            })?;

        shared.state.lock().lifecycle = EngineState::Running;

        Ok(Self {
            filter: SeverityFilter::new(config.min_level),
            config,
            metrics,
            core: Some(EngineCore {
                shared,
                worker: Mutex::new(Some(handle)),
            }),
        })
    }

    fn not_started(config: EngineConfig) -> Self {
        Self {
            filter: SeverityFilter::new(config.min_level),
            config,
            metrics: Arc::new(LoggerMetrics::new()),
            core: None,
        }
    }

    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let Some(core) = &self.core else {
            self.metrics.record_rejected();
            return;
        };
        if !self.filter.accepts(level) {
            self.metrics.record_filtered();
            return;
        }

        let message = message.into();
        let shared = &core.shared;
        let mut state = shared.state.lock();

        // Only under OverflowPolicy::Block: the last hand-off is still
        // waiting for the writer to return the standby buffer.
        if state.buffers.is_active_full() && state.lifecycle == EngineState::Running {
            self.metrics.record_block();
            while state.buffers.is_active_full() && state.lifecycle == EngineState::Running {
                shared.buffer_returned.wait(&mut state);
            }
        }

        if state.lifecycle != EngineState::Running {
            self.metrics.record_rejected();
            return;
        }

        let entry = LogEntry::new(level, message, Timestamp::now(self.config.clock));
        self.metrics.record_accepted();
        if state.buffers.append(entry) == AppendOutcome::Full {
            self.hand_off(&mut state);
        }
    }

    fn hand_off(&self, state: &mut BufferState) {
        let full = match self.config.overflow_policy {
            OverflowPolicy::Grow => {
                if !state.buffers.has_standby() {
                    self.metrics.record_grow();
                }
                state.buffers.swap_or_allocate()
            }
            OverflowPolicy::Block => match state.buffers.swap_and_reset() {
                Some(full) => full,
                // Shared::recycle completes the swap when the standby returns
                None => return,
            },
        };
        Shared::dispatch(state, full, &self.metrics);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Stop accepting messages, let the writer finish, write what is left
    /// in the active buffer and close the sink.
    ///
    /// Blocks until everything accepted before this call is written.
    /// Calling it again, or on an engine that never started, does nothing.
    pub fn terminate(&self) {
        let Some(core) = &self.core else {
            return;
        };
        // Held throughout so a concurrent terminate waits for this one
        let mut worker = core.worker.lock();
        let Some(handle) = worker.take() else {
            return;
        };

        {
            let mut state = core.shared.state.lock();
            state.lifecycle = EngineState::Stopping;
            // Queued behind every buffer already handed off
            let _ = state.signals.send(WriterSignal::Stop);
        }
        core.shared.buffer_returned.notify_all();

        let sink = match handle.join() {
            Ok(sink) => Some(sink),
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER ERROR] Writer thread panicked during shutdown: {}",
                    panic_message(panic_info.as_ref())
                );
                None
            }
        };

        let mut remaining = core.shared.state.lock().buffers.take_active();
        match sink {
            Some(mut sink) => {
                drain_into(sink.as_mut(), &mut remaining, &self.metrics);
                // dropping the sink closes the file
                drop(sink);
            }
            None => {
                for _ in 0..remaining.len() {
                    self.metrics.record_write_failure();
                }
            }
        }

        core.shared.state.lock().lifecycle = EngineState::Stopped;
    }

    pub fn state(&self) -> EngineState {
        match &self.core {
            Some(core) => core.shared.state.lock().lifecycle,
            None => EngineState::NotStarted,
        }
    }

    /// True while `log` calls are accepted
    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Running
    }

    pub fn min_level(&self) -> LogLevel {
        self.filter.min_level()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Builder for constructing an [`Engine`] with a fluent API
///
/// # Example
/// ```no_run
/// use rust_swap_logger::prelude::*;
///
/// let engine = Engine::builder()
///     .path("app.log")
///     .min_level(LogLevel::Debug)
///     .buffer_capacity(256)
///     .overflow_policy(OverflowPolicy::Block)
///     .build();
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    sink: Option<Box<dyn LogSink>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(PathBuf::new()),
            sink: None,
        }
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Entries per buffer. Defaults to
    /// [`DEFAULT_BUFFER_CAPACITY`](crate::core::config::DEFAULT_BUFFER_CAPACITY).
    #[must_use = "builder methods return a new value"]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: ClockSource) -> Self {
        self.config.clock = clock;
        self
    }

    /// Write to `sink` instead of opening `path`
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the engine, degrading to a silent one on any error
    pub fn build(self) -> Engine {
        let config = self.config.clone();
        self.try_build().unwrap_or_else(|_| Engine::not_started(config))
    }

    pub fn try_build(self) -> Result<Engine> {
        match self.sink {
            Some(sink) => Engine::with_sink(self.config, sink),
            None => Engine::try_launch(self.config),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
