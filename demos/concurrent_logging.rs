//! Concurrent logging example
//!
//! Demonstrates many threads sharing one logger through a small queue.
//!
//! Run with: cargo run --example concurrent_logging

use journal_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    println!("=== Journal Logger - Concurrent Logging Example ===\n");

    let dir = std::env::temp_dir().join("journal_logger_concurrent");
    std::fs::create_dir_all(&dir)?;

    // A small queue makes producers wait for the writer now and then
    let logger = Arc::new(
        Logger::builder(&dir)
            .threshold(LogLevel::Info)
            .queue_capacity(16)
            .console(false)
            .build(),
    );

    println!("1. Multi-threaded logging:");
    let start = Instant::now();
    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for i in 0..200 {
                logger.info("worker", "process", format!("Thread {} - Message {}", thread_id, i));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    println!("   1000 messages emitted in {:?}", start.elapsed());

    println!("\n2. Shutting down with drain:");
    if !logger.shutdown(Duration::from_secs(10)) {
        eprintln!("Warning: Logger shutdown timed out");
    }

    let metrics = logger.metrics();
    println!("   written:      {}", metrics.total_written());
    println!("   dropped:      {}", metrics.dropped_count());
    println!("   block events: {}", metrics.block_events());

    let lines = std::fs::read_to_string(logger.path())?.lines().count();
    println!("   lines in {}: {}", logger.path().display(), lines);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
