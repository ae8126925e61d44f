//! Core engine types and traits

pub mod config;
pub mod double_buffer;
pub mod engine;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod overflow_policy;
pub mod sink;
pub mod timestamp;
pub mod writer;

pub use config::{EngineConfig, DEFAULT_BUFFER_CAPACITY};
pub use double_buffer::{AppendOutcome, Buffer, DoubleBuffer};
pub use engine::{Engine, EngineBuilder, EngineState};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::{LogLevel, SeverityFilter};
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use sink::LogSink;
pub use timestamp::{ClockSource, Timestamp};
pub use writer::{WriterSignal, WRITER_THREAD_NAME};
