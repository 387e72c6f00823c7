//! File appender implementation

use crate::core::{Appender, LoggerError, Message, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends rendered lines to a single log file
///
/// The file is created, or truncated if it already exists, when the appender
/// is opened. Writes are buffered; buffered lines reach the file on `flush`
/// and when the appender is dropped.
pub struct FileAppender {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl FileAppender {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| {
            LoggerError::io_operation(
                "opening log file",
                format!("cannot create '{}'", path.display()),
                e,
            )
        })?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the file
    ///
    /// Later appends fail; closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "closing log file",
                    format!("cannot flush '{}'", self.path.display()),
                    e,
                )
            }),
            None => Ok(()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }
}

impl Appender for FileAppender {
    fn append(&mut self, line: &str, _message: &Message) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.close();
    }
}
