//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes the logger, the origin and operation tags, then a format
//! string with arguments, like `format!`.
//!
//! # Examples
//!
//! ```no_run
//! use journal_logger::prelude::*;
//! use journal_logger::{info, warning};
//!
//! let logger = Logger::new("/var/log/myapp", LogLevel::Info);
//!
//! let port = 8080;
//! info!(logger, "server", "bind", "listening on port {}", port);
//! warning!(logger, "server", "accept", "{} connections pending", 12);
//! ```
//!
//! The `fatal!` and `error!` macros record formatted text; to record an
//! error value directly, call [`Logger::fatal`](crate::Logger::fatal) or
//! [`Logger::error`](crate::Logger::error).

/// Log a formatted message at the given level.
///
/// # Examples
///
/// ```no_run
/// # use journal_logger::prelude::*;
/// # let logger = Logger::new("/tmp", LogLevel::Debug);
/// use journal_logger::log;
/// log!(logger, LogLevel::Info, "svc", "start", "Simple message");
/// log!(logger, LogLevel::Warning, "svc", "retry", "attempt {}", 2);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $origin:expr, $operation:expr, $($arg:tt)+) => {
        $logger.log($level, $origin, $operation, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $origin:expr, $operation:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $origin, $operation, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $origin:expr, $operation:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $origin, $operation, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $origin:expr, $operation:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $origin, $operation, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```no_run
/// # use journal_logger::prelude::*;
/// # let logger = Logger::new("/tmp", LogLevel::Debug);
/// use journal_logger::error;
/// error!(logger, "db", "query", "code {}: {}", 500, "internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $origin:expr, $operation:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $origin, $operation, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $origin:expr, $operation:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $origin, $operation, $($arg)+)
    };
}
