//! Stress tests for the bounded queue
//!
//! These tests verify:
//! - A full queue blocks producers instead of dropping messages
//! - No admitted message is lost under heavy concurrent load
//! - Shutdown drains a full queue

use journal_logger::prelude::*;
use journal_logger::parse_line;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Mirror that holds the writer thread until the gate is opened
struct GateAppender {
    gate: crossbeam_channel::Receiver<()>,
}

impl Appender for GateAppender {
    fn append(&mut self, _line: &str, _message: &Message) -> Result<()> {
        // returns immediately once the sender side is dropped
        let _ = self.gate.recv();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "gate"
    }
}

#[test]
fn test_full_queue_blocks_next_producer() {
    const CAPACITY: usize = 2;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (open_gate, gate) = crossbeam_channel::bounded::<()>(0);

    let logger = Arc::new(
        Logger::builder(temp_dir.path())
            .queue_capacity(CAPACITY)
            .console(false)
            .appender(GateAppender { gate })
            .build(),
    );

    let completed = Arc::new(AtomicUsize::new(0));
    let producer = {
        let logger = Arc::clone(&logger);
        let completed = Arc::clone(&completed);
        std::thread::spawn(move || {
            for i in 0..6 {
                logger.info("producer", "emit", format!("m{}", i));
                completed.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    std::thread::sleep(Duration::from_millis(300));

    // One message held by the writer, CAPACITY waiting in the queue,
    // the next producer call blocked
    assert_eq!(completed.load(Ordering::SeqCst), CAPACITY + 1);
    assert_eq!(logger.queued(), CAPACITY);
    assert!(logger.metrics().block_events() >= 1);
    assert_eq!(logger.dropped_count(), 0);

    drop(open_gate);
    producer.join().expect("producer panicked");
    assert_eq!(completed.load(Ordering::SeqCst), 6);
    assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));

    let content = std::fs::read_to_string(logger.path()).expect("Failed to read log file");
    let payloads: Vec<&str> = content
        .lines()
        .map(|line| parse_line(line).expect("line should parse").payload)
        .collect();
    assert_eq!(payloads, vec!["m0", "m1", "m2", "m3", "m4", "m5"]);
}

#[test]
fn test_high_volume_small_queue_loses_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Logger::builder(temp_dir.path())
            .threshold(LogLevel::Debug)
            .queue_capacity(4)
            .console(false)
            .build(),
    );

    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..500 {
                match i % 3 {
                    0 => logger.debug("stress", "emit", format!("{}-{}", thread_id, i)),
                    1 => logger.info("stress", "emit", format!("{}-{}", thread_id, i)),
                    _ => logger.warning("stress", "emit", format!("{}-{}", thread_id, i)),
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    assert!(logger.shutdown(Duration::from_secs(30)));

    let content = std::fs::read_to_string(logger.path()).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 4000);
    assert_eq!(logger.metrics().total_written(), 4000);
    assert_eq!(logger.dropped_count(), 0);
}

#[test]
fn test_shutdown_drains_full_queue() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::builder(temp_dir.path())
        .queue_capacity(DEFAULT_QUEUE_CAPACITY)
        .console(false)
        .build();

    for i in 0..(DEFAULT_QUEUE_CAPACITY * 4) {
        logger.info("svc", "burst", format!("{}", i));
    }
    assert!(logger.shutdown(Duration::from_secs(30)));

    let content = std::fs::read_to_string(logger.path()).expect("Failed to read log file");
    let last = content.lines().last().expect("file is not empty");
    assert!(last.ends_with(&format!(" | INFO | {}", DEFAULT_QUEUE_CAPACITY * 4 - 1)));
    assert_eq!(content.lines().count(), DEFAULT_QUEUE_CAPACITY * 4);
}

#[test]
fn test_concurrent_stop_calls() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Logger::builder(temp_dir.path())
            .console(false)
            .build(),
    );

    let mut handles = vec![];
    for _ in 0..8 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            logger.info("svc", "op", "racing");
            logger.stop();
            logger.stop();
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(logger.is_stopped());
    assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
    let written = logger.metrics().total_written();
    let rejected = logger.metrics().rejected_count();
    assert_eq!(written + rejected + logger.dropped_count(), 8);
}
