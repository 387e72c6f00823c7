//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod output_format;
pub mod timestamp;
mod worker;

pub use appender::Appender;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_level::{level_label, LogLevel, Threshold, CUSTOM_LABEL};
pub use logger::{Logger, LoggerBuilder, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
pub use message::Message;
pub use metrics::LoggerMetrics;
pub use output_format::{parse_line, OutputFormat, ParsedLine};
