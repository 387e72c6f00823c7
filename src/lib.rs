//! # Journal Logger
//!
//! An asynchronous logger that writes leveled messages to a file and mirrors
//! them to the console.
//!
//! Callers emit from any thread; a bounded queue carries the messages to a
//! single writer thread, which owns the log file. A full queue blocks the
//! caller until the writer catches up, so admitted messages are neither
//! dropped nor reordered.
//!
//! ```no_run
//! use journal_logger::prelude::*;
//!
//! let logger = Logger::new("/var/log/myapp", LogLevel::Info);
//! logger.info("server", "start", "booting");
//! logger.debug("server", "tick", "below the threshold, never written");
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk unplugged");
//! logger.error("storage", "flush", &err);
//!
//! logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
//! ```
//!
//! Each line of the file reads `D.M.Y | H:Min:S | LEVEL | payload`.

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        Message, OutputFormat, Result, Threshold, DEFAULT_QUEUE_CAPACITY,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::{
    level_label, parse_line, Appender, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, Message, OutputFormat, ParsedLine, Result, Threshold,
    CUSTOM_LABEL, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
