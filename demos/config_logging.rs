//! Configuration example
//!
//! Demonstrates building a logger from a JSON configuration.
//!
//! Run with: cargo run --example config_logging

use journal_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Journal Logger - Configuration Example ===\n");

    let dir = std::env::temp_dir().join("journal_logger_config");
    std::fs::create_dir_all(&dir)?;

    let json = format!(
        r#"{{
            "directory": {},
            "threshold": "WARNING",
            "queue_capacity": 64,
            "colors": false,
            "format": "tagged"
        }}"#,
        serde_json::to_string(&dir)?
    );

    let config = LoggerConfig::from_json_str(&json)?;
    println!("1. Loaded configuration:\n{}\n", serde_json::to_string_pretty(&config)?);

    let logger = Logger::from_config(&config)?;
    logger.warning("config", "load", "tagged lines carry origin and operation");
    logger.info("config", "load", "filtered at WARNING");

    println!("\n2. Invalid configurations are rejected:");
    match LoggerConfig::from_json_str(r#"{"directory": "", "queue_capacity": 0}"#) {
        Ok(_) => println!("   unexpectedly accepted"),
        Err(e) => println!("   {}", e),
    }

    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("\nFile contents:");
    print!("{}", std::fs::read_to_string(logger.path())?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
