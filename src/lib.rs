//! # Rust Swap Logger
//!
//! An in-process asynchronous file logger. Application threads hand finished
//! messages to an [`Engine`]; a single background thread writes them out a
//! buffer at a time.
//!
//! ## Features
//!
//! - **Non-blocking producers**: `log` only appends to an in-memory buffer
//! - **Double buffering**: a full buffer is swapped out and drained while
//!   producers fill the other one
//! - **Drain on exit**: `terminate` writes everything accepted before it was
//!   called, then closes the file
//! - **Fails silently**: a log file that cannot be opened turns every call
//!   into a no-op instead of an error
//!
//! Every line has the form `YYYY-M-D HH:MM:SS.mmm [level] message`.

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ClockSource, Engine, EngineBuilder, EngineConfig, EngineState, LogEntry, LogLevel,
        LogSink, LoggerError, LoggerMetrics, OverflowPolicy, Result, Timestamp,
        DEFAULT_BUFFER_CAPACITY,
    };
    pub use crate::sinks::FileSink;
}

pub use core::{
    AppendOutcome, Buffer, ClockSource, DoubleBuffer, Engine, EngineBuilder, EngineConfig,
    EngineState, LogEntry, LogLevel, LogSink, LoggerError, LoggerMetrics, OverflowPolicy, Result,
    SeverityFilter, Timestamp, WriterSignal, DEFAULT_BUFFER_CAPACITY,
};
pub use sinks::FileSink;
