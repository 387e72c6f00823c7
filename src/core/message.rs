//! Log message structure

use super::log_level::{level_label, LogLevel};
use chrono::{DateTime, Local};
use serde::Serialize;

/// One log event, immutable once created
///
/// The origin and operation tags identify the component and the operation
/// that emitted the message. The default line format leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    timestamp: DateTime<Local>,
    severity: i32,
    origin: String,
    operation: String,
    payload: String,
}

impl Message {
    /// Sanitize text to prevent log injection attacks
    ///
    /// Backslashes, newlines, carriage returns and tabs become escape
    /// sequences, so one message always renders as exactly one line and the
    /// original text can be recovered. Tags also escape `|`, keeping the
    /// column separator out of every column but the last.
    fn sanitize(text: &str, escape_separator: bool) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                '|' if escape_separator => escaped.push_str("\\|"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    pub fn new(
        level: LogLevel,
        origin: impl Into<String>,
        operation: impl Into<String>,
        payload: impl AsRef<str>,
    ) -> Self {
        Self::with_severity(level.value(), origin, operation, payload)
    }

    /// Build a message from a raw severity value
    ///
    /// Values outside the known levels are kept and rendered as `CUSTOM`.
    pub fn with_severity(
        severity: i32,
        origin: impl Into<String>,
        operation: impl Into<String>,
        payload: impl AsRef<str>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            origin: Self::sanitize(&origin.into(), true),
            operation: Self::sanitize(&operation.into(), true),
            payload: Self::sanitize(payload.as_ref(), false),
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn severity(&self) -> i32 {
        self.severity
    }

    pub fn level(&self) -> Option<LogLevel> {
        LogLevel::from_value(self.severity)
    }

    pub fn label(&self) -> &'static str {
        level_label(self.severity)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}
