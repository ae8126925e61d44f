//! Process-wide engine handle
//!
//! For applications that want one log file for the whole process without
//! passing an [`Engine`] around. `launch` and `terminate` are idempotent;
//! log calls before `launch` or after `terminate` do nothing.
//!
//! ```no_run
//! use rust_swap_logger::{global, LogLevel};
//!
//! global::launch("./test.log", LogLevel::Info);
//! for i in 0..100 {
//!     global::info(format!("yes! {}", i));
//! }
//! global::terminate();
//! ```

use crate::core::{Engine, EngineConfig, LogLevel};
use parking_lot::{Mutex, RwLock};
use std::path::PathBuf;
use std::sync::Arc;

static ENGINE: RwLock<Option<Arc<Engine>>> = parking_lot::const_rwlock(None);

/// Serializes launch against terminate so a draining engine and its
/// successor never share the file
static LIFECYCLE: Mutex<()> = parking_lot::const_mutex(());

pub fn launch(path: impl Into<PathBuf>, min_level: LogLevel) {
    launch_with(EngineConfig::new(path).with_min_level(min_level));
}

/// Launch with a full configuration. Ignored while an engine is installed,
/// including one that failed to open its file.
pub fn launch_with(config: EngineConfig) {
    let _lifecycle = LIFECYCLE.lock();
    if ENGINE.read().is_some() {
        return;
    }
    let engine = Arc::new(Engine::launch_with(config));
    *ENGINE.write() = Some(engine);
}

/// Uninstall the engine and drain it. Blocks until the file is closed.
pub fn terminate() {
    let _lifecycle = LIFECYCLE.lock();
    let engine = ENGINE.write().take();
    if let Some(engine) = engine {
        engine.terminate();
    }
}

/// True between `launch` and `terminate`, even when the file could not be
/// opened
pub fn is_launched() -> bool {
    ENGINE.read().is_some()
}

/// The installed engine, if any
pub fn engine() -> Option<Arc<Engine>> {
    ENGINE.read().clone()
}

pub fn log(level: LogLevel, message: impl Into<String>) {
    // Clone out so terminate never waits on a producer holding the read lock
    let engine = ENGINE.read().clone();
    if let Some(engine) = engine {
        engine.log(level, message);
    }
}

#[inline]
pub fn trace(message: impl Into<String>) {
    log(LogLevel::Trace, message);
}

#[inline]
pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

#[inline]
pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

#[inline]
pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message);
}

#[inline]
pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

#[inline]
pub fn fatal(message: impl Into<String>) {
    log(LogLevel::Fatal, message);
}
