//! Timestamp formatting utilities
//!
//! Log lines and file names use day-first dates without zero padding
//! (`7.3.2024 | 9:05:02` is written as `7.3.2024 | 9:5:2`).

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// strftime pattern for the timestamp column of a log line
pub const LINE_TIMESTAMP: &str = "%-d.%-m.%Y | %-H:%-M:%-S";

/// strftime pattern for the log file stem
pub const FILE_STEM: &str = "%-d.%-m.%Y_%-H:%-M";

/// strftime pattern for the console prefix
pub const CONSOLE_PREFIX: &str = "%Y/%m/%d %H:%M:%S";

/// Extension appended to every log file name
pub const FILE_EXTENSION: &str = "log";

/// Format the timestamp column of a log line: `D.M.Y | H:Min:S`
#[must_use]
pub fn line_timestamp<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    datetime.format(LINE_TIMESTAMP).to_string()
}

/// Format a log file name: `D.M.Y_H:Min.log`
///
/// Minute granularity: two loggers created in the same directory within the
/// same minute share a file name.
#[must_use]
pub fn file_name<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("{}.{}", datetime.format(FILE_STEM), FILE_EXTENSION)
}

/// Format the prefix the console stream puts in front of each mirrored line
#[must_use]
pub fn console_prefix<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    datetime.format(CONSOLE_PREFIX).to_string()
}
