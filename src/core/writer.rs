//! The single background writer
//!
//! The worker owns the sink for its whole life and sleeps on a channel
//! until it receives either a full buffer or the stop signal. Filtering has
//! already happened; every entry it sees is written.

use super::{
    double_buffer::Buffer,
    engine::Shared,
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    sink::LogSink,
};
use crossbeam_channel::Receiver;
use std::any::Any;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub const WRITER_THREAD_NAME: &str = "swap-logger-writer";

/// Messages from producers (and the lifecycle controller) to the writer
#[derive(Debug)]
pub enum WriterSignal {
    BufferReady(Buffer),
    Stop,
}

pub(crate) struct WriterWorker {
    receiver: Receiver<WriterSignal>,
    sink: Box<dyn LogSink>,
    shared: Arc<Shared>,
    metrics: Arc<LoggerMetrics>,
}

impl WriterWorker {
    pub(crate) fn new(
        receiver: Receiver<WriterSignal>,
        sink: Box<dyn LogSink>,
        shared: Arc<Shared>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            receiver,
            sink,
            shared,
            metrics,
        }
    }

    /// Start the thread. Joining it gives the sink back.
    pub(crate) fn spawn(self) -> io::Result<JoinHandle<Box<dyn LogSink>>> {
        thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || self.run())
    }

    fn run(mut self) -> Box<dyn LogSink> {
        loop {
            match self.receiver.recv() {
                Ok(WriterSignal::BufferReady(mut buffer)) => {
                    drain_into(self.sink.as_mut(), &mut buffer, &self.metrics);
                    self.shared.recycle(buffer);
                }
                // A closed channel means the engine is gone; treat it as stop
                Ok(WriterSignal::Stop) | Err(_) => break,
            }
        }
        self.sink
    }
}

/// Write every entry of `buffer` in order, then flush once.
///
/// Sink errors and panics are reported to stderr and counted; they never
/// propagate.
pub(crate) fn drain_into(sink: &mut dyn LogSink, buffer: &mut Buffer, metrics: &LoggerMetrics) {
    if buffer.is_empty() {
        return;
    }

    for entry in buffer.drain() {
        write_one(sink, &entry, metrics);
    }

    let flush_result = catch_unwind(AssertUnwindSafe(|| sink.flush()));
    match flush_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
        }
        Err(panic_info) => {
            eprintln!(
                "[LOGGER CRITICAL] Sink '{}' panicked during flush: {}",
                sink.name(),
                panic_message(panic_info.as_ref())
            );
        }
    }
}

fn write_one(sink: &mut dyn LogSink, entry: &LogEntry, metrics: &LoggerMetrics) {
    let result = catch_unwind(AssertUnwindSafe(|| sink.write_entry(entry)));
    match result {
        Ok(Ok(())) => {
            metrics.record_written();
        }
        Ok(Err(e)) => {
            let failures = metrics.record_write_failure();
            // first failure and then every 1000th, so a dead disk does not flood stderr
            if failures % 1000 == 0 {
                eprintln!(
                    "[LOGGER ERROR] Sink '{}' failed to write ({} failures so far): {}",
                    sink.name(),
                    failures + 1,
                    e
                );
            }
        }
        Err(panic_info) => {
            metrics.record_write_failure();
            eprintln!(
                "[LOGGER CRITICAL] Sink '{}' panicked: {}",
                sink.name(),
                panic_message(panic_info.as_ref())
            );
        }
    }
}

pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
