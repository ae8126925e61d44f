//! Logging macros for ergonomic log message formatting.
//!
//! The engine only ever receives a finished string. These macros build it
//! with `format!` at the call site, the way `println!` does.
//!
//! # Examples
//!
//! ```
//! use rust_swap_logger::prelude::*;
//! use rust_swap_logger::info;
//!
//! let engine = Engine::builder().build();
//!
//! // Basic logging
//! info!(engine, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(engine, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_swap_logger::prelude::*;
/// # let engine = Engine::builder().build();
/// use rust_swap_logger::log;
/// log!(engine, LogLevel::Info, "Simple message");
/// log!(engine, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($engine:expr, $level:expr, $($arg:tt)+) => {
        $engine.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_swap_logger::prelude::*;
/// # let engine = Engine::builder().build();
/// use rust_swap_logger::info;
/// info!(engine, "yes! {}", 0);
/// ```
#[macro_export]
macro_rules! info {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_swap_logger::prelude::*;
/// # let engine = Engine::builder().build();
/// use rust_swap_logger::fatal;
/// fatal!(engine, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Fatal, $($arg)+)
    };
}
