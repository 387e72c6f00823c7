//! Line formats for rendered messages
//!
//! - Text: `D.M.Y | H:Min:S | LEVEL | payload` (default)
//! - Tagged: `D.M.Y | H:Min:S | LEVEL | origin | operation | payload`

use super::log_level::{LogLevel, CUSTOM_LABEL};
use super::message::Message;
use super::timestamp;
use serde::{Deserialize, Serialize};

/// Column separator used by every line format
pub const SEPARATOR: &str = " | ";

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Timestamp, level and payload only
    ///
    /// Example: `7.3.2024 | 9:5:2 | INFO | booting`
    #[default]
    Text,

    /// Text format with the origin and operation tags inserted before the payload
    ///
    /// Example: `7.3.2024 | 9:5:2 | INFO | svc | start | booting`
    Tagged,
}

impl OutputFormat {
    /// Render a message to a single line, without the trailing newline
    pub fn render(&self, message: &Message) -> String {
        let stamp = timestamp::line_timestamp(message.timestamp());
        match self {
            OutputFormat::Text => [stamp.as_str(), message.label(), message.payload()]
                .join(SEPARATOR),
            OutputFormat::Tagged => [
                stamp.as_str(),
                message.label(),
                message.origin(),
                message.operation(),
                message.payload(),
            ]
            .join(SEPARATOR),
        }
    }

    fn column_count(&self) -> usize {
        match self {
            OutputFormat::Text => 4,
            OutputFormat::Tagged => 6,
        }
    }

    /// Split a rendered line back into its columns
    ///
    /// Returns `None` when the line does not follow this format: malformed
    /// date or time, an unknown level token, or missing columns.
    pub fn parse<'a>(&self, line: &'a str) -> Option<ParsedLine<'a>> {
        // the timestamp itself contains one separator
        let columns: Vec<&str> = line.splitn(self.column_count(), SEPARATOR).collect();
        if columns.len() != self.column_count() {
            return None;
        }

        let (date, time, label) = (columns[0], columns[1], columns[2]);
        if !is_numeric_triplet(date, '.') || !is_numeric_triplet(time, ':') {
            return None;
        }
        if !is_level_token(label) {
            return None;
        }

        let (origin, operation, payload) = match self {
            OutputFormat::Text => (None, None, columns[3]),
            OutputFormat::Tagged => (Some(columns[3]), Some(columns[4]), columns[5]),
        };

        Some(ParsedLine {
            date,
            time,
            label,
            origin,
            operation,
            payload,
        })
    }
}

/// Columns of a rendered log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub label: &'a str,
    pub origin: Option<&'a str>,
    pub operation: Option<&'a str>,
    pub payload: &'a str,
}

/// Parse a line written in the default text format
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    OutputFormat::Text.parse(line)
}

/// Whether `token` is one of the six level labels a line may carry
pub fn is_level_token(token: &str) -> bool {
    token == CUSTOM_LABEL || LogLevel::ALL.iter().any(|level| level.to_str() == token)
}

fn is_numeric_triplet(text: &str, delimiter: char) -> bool {
    let parts: Vec<&str> = text.split(delimiter).collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
