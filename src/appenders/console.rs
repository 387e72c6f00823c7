//! Console appender implementation

use crate::core::{timestamp, Appender, Message, Result};
use chrono::Local;
use std::io::Write;

#[cfg(feature = "console")]
use colored::Colorize;

/// Mirrors every written line to stderr
///
/// Each line gets the console stream's own timestamp prefix, so a mirrored
/// line reads `2024/03/07 09:05:02 7.3.2024 | 9:5:2 | INFO | booting`.
pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Prefix and optionally colour a line for the console
    fn decorate(&self, line: &str, message: &Message) -> String {
        let prefix = timestamp::console_prefix(&Local::now());
        format!("{} {}", prefix, self.colorize(line, message))
    }

    #[cfg(feature = "console")]
    fn colorize(&self, line: &str, message: &Message) -> String {
        match message.level() {
            Some(level) if self.use_colors => line.color(level.color_code()).to_string(),
            _ => line.to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, line: &str, _message: &Message) -> String {
        line.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str, message: &Message) -> Result<()> {
        let output = self.decorate(line, message);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
