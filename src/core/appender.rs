//! Appender trait for log output destinations

use super::{error::Result, message::Message};

/// A destination for rendered log lines
///
/// The writer thread renders each message once and hands the same line to
/// every appender, together with the message it came from.
pub trait Appender: Send + Sync {
    fn append(&mut self, line: &str, message: &Message) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
