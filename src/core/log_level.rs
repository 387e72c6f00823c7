//! Log level and threshold definitions
//!
//! Levels are numbered from the most severe (`Fatal = 1`) to the least severe
//! (`Debug = 5`). A [`Threshold`] admits every level whose value is less than
//! or equal to its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used for severities outside the five known levels
pub const CUSTOM_LABEL: &str = "CUSTOM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Fatal = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    #[inline]
    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(LogLevel::Fatal),
            2 => Some(LogLevel::Error),
            3 => Some(LogLevel::Warning),
            4 => Some(LogLevel::Info),
            5 => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Fatal => BrightRed,
            LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Info => Green,
            LogLevel::Debug => Blue,
        }
    }
}

/// Level name for a raw severity value, falling back to `CUSTOM`
pub fn level_label(severity: i32) -> &'static str {
    LogLevel::from_value(severity)
        .map(|level| level.to_str())
        .unwrap_or(CUSTOM_LABEL)
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Maximum severity value a logger records
///
/// A threshold of zero or below silences the logger entirely.
///
/// # Example
///
/// ```
/// use journal_logger::{LogLevel, Threshold};
///
/// let threshold = Threshold::from(LogLevel::Warning);
/// assert!(threshold.admits(LogLevel::Error.value()));
/// assert!(!threshold.admits(LogLevel::Info.value()));
/// assert!(!Threshold::SILENT.admits(LogLevel::Fatal.value()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "ThresholdRepr")]
pub struct Threshold(i32);

impl Threshold {
    pub const SILENT: Threshold = Threshold(0);

    pub const fn new(value: i32) -> Self {
        Threshold(value)
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn is_silent(self) -> bool {
        self.0 <= 0
    }

    /// Whether a message of the given severity value passes this threshold
    #[inline]
    pub fn admits(self, severity: i32) -> bool {
        !self.is_silent() && severity <= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        LogLevel::default().into()
    }
}

impl From<LogLevel> for Threshold {
    fn from(level: LogLevel) -> Self {
        Threshold(level.value())
    }
}

impl From<i32> for Threshold {
    fn from(value: i32) -> Self {
        Threshold(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_silent() {
            write!(f, "SILENT({})", self.0)
        } else {
            write!(f, "{}", level_label(self.0))
        }
    }
}

/// Accepts `4` as well as `"INFO"` in configuration files
#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
    Value(i32),
    Level(LogLevel),
}

impl From<ThresholdRepr> for Threshold {
    fn from(repr: ThresholdRepr) -> Self {
        match repr {
            ThresholdRepr::Value(value) => Threshold(value),
            ThresholdRepr::Level(level) => level.into(),
        }
    }
}
