//! Integration tests for the swap logger
//!
//! These tests verify:
//! - Submission order and zero loss across buffer swaps
//! - Severity threshold filtering
//! - Idempotent lifecycle and silence outside it
//! - Line format
//! - Degraded mode when the file cannot be opened

use rust_swap_logger::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(String::from)
        .collect()
}

/// The message part of a line: everything after `[level] `
fn message_of(line: &str) -> &str {
    let close = line.find("] ").expect("line has a level tag");
    &line[close + 2..]
}

fn level_of(line: &str) -> &str {
    let open = line.find('[').expect("line has a level tag");
    let close = line.find(']').expect("line has a level tag");
    &line[open + 1..close]
}

#[test]
fn test_lines_in_submission_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("order.log");

    let engine = Engine::launch(&log_file, LogLevel::Info);
    for i in 0..100 {
        engine.info(format!("yes! {}", i));
    }
    engine.terminate();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 100);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(message_of(line), format!("yes! {}", i));
    }
}

#[test]
fn test_no_loss_around_buffer_boundaries() {
    let capacity = DEFAULT_BUFFER_CAPACITY;
    for count in [
        0,
        1,
        capacity - 1,
        capacity,
        capacity + 1,
        2 * capacity - 1,
        2 * capacity,
        2 * capacity + 1,
        7 * capacity + 3,
    ] {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_file = temp_dir.path().join("boundary.log");

        let engine = Engine::launch(&log_file, LogLevel::Info);
        for i in 0..count {
            engine.info(format!("msg {}", i));
        }
        engine.terminate();

        let lines = read_lines(&log_file);
        assert_eq!(lines.len(), count, "count {}", count);
        let messages: Vec<&str> = lines.iter().map(|l| message_of(l)).collect();
        let expected: Vec<String> = (0..count).map(|i| format!("msg {}", i)).collect();
        assert_eq!(messages, expected, "count {}", count);
    }
}

#[test]
fn test_threshold_filtering() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("threshold.log");

    let engine = Engine::launch(&log_file, LogLevel::Warn);
    engine.trace("t");
    engine.debug("d");
    engine.info("i");
    engine.warn("w");
    engine.error("e");
    engine.fatal("f");
    engine.terminate();

    let lines = read_lines(&log_file);
    let levels: Vec<&str> = lines.iter().map(|l| level_of(l)).collect();
    assert_eq!(levels, vec!["warn", "error", "fatal"]);
    assert_eq!(engine.metrics().filtered_count(), 3);
}

#[test]
fn test_default_threshold_is_info() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("default_level.log");

    let engine = Engine::builder().path(&log_file).build();
    engine.debug("hidden");
    engine.info("shown");
    engine.terminate();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);
    assert_eq!(level_of(&lines[0]), "info");
}

#[test]
fn test_line_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("format.log");

    let engine = Engine::launch(&log_file, LogLevel::Info);
    engine.info("yes! 0");
    engine.terminate();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);
    let line = &lines[0];

    // YYYY-M-D HH:MM:SS.mmm [info] yes! 0
    let mut parts = line.splitn(3, ' ');
    let date = parts.next().unwrap();
    let time = parts.next().unwrap();
    let rest = parts.next().unwrap();
    assert_eq!(rest, "[info] yes! 0");

    let date_fields: Vec<&str> = date.split('-').collect();
    assert_eq!(date_fields.len(), 3);
    assert!(date_fields.iter().all(|f| f.parse::<u32>().is_ok()));
    assert!(!date_fields[1].starts_with('0'), "month is not padded: {}", date);
    assert!(!date_fields[2].starts_with('0'), "day is not padded: {}", date);

    let (hms, millis) = time.split_once('.').expect("time has milliseconds");
    assert_eq!(millis.len(), 3);
    let hms: Vec<&str> = hms.split(':').collect();
    assert_eq!(hms.len(), 3);
    assert!(hms.iter().all(|f| f.len() == 2 && f.parse::<u32>().is_ok()));
}

#[test]
fn test_multiline_message_stays_on_one_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection.log");

    let engine = Engine::launch(&log_file, LogLevel::Info);
    engine.info("User login\n2024-1-1 00:00:00.000 [fatal] Fake entry");
    engine.terminate();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("\\n"));
}

#[test]
fn test_terminate_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("terminate_twice.log");

    let engine = Engine::launch(&log_file, LogLevel::Info);
    engine.info("one");
    engine.terminate();
    engine.terminate();
    assert_eq!(engine.state(), EngineState::Stopped);

    assert_eq!(read_lines(&log_file).len(), 1);
}

#[test]
fn test_silence_after_terminate() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("after.log");

    let engine = Engine::launch(&log_file, LogLevel::Trace);
    engine.info("before");
    engine.terminate();
    for i in 0..50 {
        engine.fatal(format!("after {}", i));
    }

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);
    assert_eq!(message_of(&lines[0]), "before");
    assert_eq!(engine.metrics().rejected_count(), 50);
}

#[test]
fn test_appends_to_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("append.log");

    for run in 0..2 {
        let engine = Engine::launch(&log_file, LogLevel::Info);
        engine.info(format!("run {}", run));
        engine.terminate();
    }

    let lines = read_lines(&log_file);
    let messages: Vec<&str> = lines.iter().map(|l| message_of(l)).collect();
    assert_eq!(messages, vec!["run 0", "run 1"]);
}

#[test]
fn test_unopenable_file_degrades_silently() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("missing_dir").join("x.log");

    let engine = Engine::launch(&log_file, LogLevel::Info);
    assert_eq!(engine.state(), EngineState::NotStarted);
    assert!(!engine.is_ready());
    for i in 0..25 {
        engine.error(format!("lost {}", i));
    }
    engine.terminate();
    engine.terminate();

    assert!(!log_file.exists());
    assert_eq!(engine.metrics().accepted_count(), 0);
}

#[test]
fn test_try_launch_reports_open_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("missing_dir").join("x.log");

    let result = Engine::try_launch(EngineConfig::new(&log_file));
    assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
}

#[test]
fn test_config_from_json_drives_engine() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("json.log");
    let json = serde_json::json!({
        "path": &log_file,
        "min_level": "error",
        "buffer_capacity": 3,
        "overflow_policy": "block",
        "clock": "utc",
    })
    .to_string();

    let config = EngineConfig::from_json_str(&json).expect("valid config");
    let engine = Engine::launch_with(config);
    for i in 0..10 {
        engine.warn(format!("w{}", i));
        engine.error(format!("e{}", i));
    }
    engine.terminate();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 10);
    assert!(lines.iter().all(|l| level_of(l) == "error"));
    assert_eq!(engine.metrics().swap_count(), 3);
}

#[test]
fn test_custom_sink_failure_is_counted() {
    struct FailingSink;

    impl LogSink for FailingSink {
        fn write_entry(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::writer("simulated failure"))
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    let engine = Engine::builder()
        .buffer_capacity(2)
        .sink(FailingSink)
        .try_build()
        .expect("engine starts");
    for i in 0..5 {
        engine.info(format!("m{}", i));
    }
    engine.terminate();

    assert_eq!(engine.metrics().accepted_count(), 5);
    assert_eq!(engine.metrics().write_failure_count(), 5);
    assert_eq!(engine.metrics().written_count(), 0);
}
