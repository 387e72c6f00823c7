//! Basic logger usage example
//!
//! Demonstrates the five levels, threshold filtering and the resulting file.
//!
//! Run with: cargo run --example basic_usage

use journal_logger::prelude::*;
use journal_logger::{info, warning};
use std::io;

fn main() -> Result<()> {
    println!("=== Journal Logger - Basic Usage Example ===\n");

    let dir = std::env::temp_dir().join("journal_logger_basic");
    std::fs::create_dir_all(&dir)?;

    // Everything up to DEBUG is recorded
    let logger = Logger::new(&dir, LogLevel::Debug);
    println!("Writing to {}\n", logger.path().display());

    println!("1. Logging at different levels:");
    let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
    logger.fatal("db", "connect", &refused);
    logger.error("db", "connect", &refused);
    logger.warning("cache", "evict", "cache at 90% of capacity");
    logger.info("server", "start", "listening on :8080");
    logger.debug("server", "accept", "peer 10.0.0.7");

    println!("\n2. Formatting with macros:");
    let pending = 12;
    info!(logger, "server", "accept", "{} connections pending", pending);
    warning!(logger, "server", "accept", "backlog above {}", 10);

    if !logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
        eprintln!("Warning: Logger shutdown timed out");
    }

    println!("\n3. A WARNING threshold keeps FATAL, ERROR and WARNING only:");
    // Log files are named by the minute; a second directory keeps the first file intact
    let strict_dir = dir.join("strict");
    std::fs::create_dir_all(&strict_dir)?;
    let strict = Logger::builder(&strict_dir)
        .threshold(LogLevel::Warning)
        .console(false)
        .build();
    strict.info("server", "tick", "hidden");
    strict.warning("server", "tick", "visible in the file only");
    strict.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("   filtered: {}", strict.metrics().filtered_count());

    println!("\nFile contents:");
    print!("{}", std::fs::read_to_string(logger.path())?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
