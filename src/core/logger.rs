//! Main logger implementation

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::Result,
    log_level::{LogLevel, Threshold},
    message::Message,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    timestamp,
    worker::{Shared, Worker},
};
use crate::appenders::ConsoleAppender;
use chrono::Local;
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Number of messages the queue holds before producers start to block
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

const WRITER_THREAD_NAME: &str = "journal-writer";

/// Handle to one log file and its writer thread
///
/// Emit calls filter by the threshold and enqueue; a single background thread
/// writes the queued messages to the file and mirrors them to the console.
/// The logger is `Send + Sync`: share it by reference or `Arc` with every
/// component that logs.
///
/// # Example
///
/// ```no_run
/// use journal_logger::{Logger, LogLevel};
///
/// let logger = Logger::new("/var/log/myapp", LogLevel::Info);
/// logger.info("server", "start", "listening on :8080");
/// logger.debug("server", "tick", "not recorded at INFO");
/// logger.stop();
/// ```
pub struct Logger {
    path: PathBuf,
    threshold: Threshold,
    capacity: usize,
    sender: Sender<Message>,
    stop_sender: Sender<()>,
    stopped: AtomicBool,
    shared: Arc<Shared>,
    async_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

/// Registers a producer as mid-send for as long as it lives
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Logger {
    /// Create a logger writing to a fresh file in `directory`
    ///
    /// The file is named after the current local date and time
    /// (`D.M.Y_H:Min.log`). It is opened by the writer thread, so this call
    /// never blocks on file I/O; an unwritable directory shows up as a dead
    /// logger (`is_alive() == false`) and a message on stderr.
    #[must_use]
    pub fn new(directory: impl AsRef<Path>, threshold: impl Into<Threshold>) -> Self {
        Self::builder(directory).threshold(threshold).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```no_run
    /// use journal_logger::prelude::*;
    ///
    /// let logger = Logger::builder("/tmp")
    ///     .threshold(LogLevel::Debug)
    ///     .queue_capacity(1024)
    ///     .output_format(OutputFormat::Tagged)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(directory: impl AsRef<Path>) -> LoggerBuilder {
        LoggerBuilder::new(directory)
    }

    /// Create a logger from a validated configuration
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::builder(&config.directory)
            .threshold(config.threshold)
            .queue_capacity(config.queue_capacity)
            .console(config.console)
            .colors(config.colors)
            .output_format(config.format)
            .build())
    }

    fn spawn(builder: LoggerBuilder) -> Self {
        let path = builder
            .directory
            .join(timestamp::file_name(&Local::now()));
        let capacity = builder.queue_capacity.max(1);

        let (sender, receiver) = bounded(capacity);
        let (stop_sender, stop_receiver) = bounded(1);
        let shared = Arc::new(Shared::new());

        let mut mirrors = builder.appenders;
        if builder.console {
            mirrors.insert(0, Box::new(ConsoleAppender::with_colors(builder.colors)));
        }

        let worker = Worker::new(
            path.clone(),
            builder.output_format,
            mirrors,
            receiver,
            stop_receiver,
            Arc::clone(&shared),
        );

        let handle = match thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || worker.run())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to spawn log writer thread: {}", e);
                shared.mark_dead();
                None
            }
        };

        Self {
            path,
            threshold: builder.threshold,
            capacity,
            sender,
            stop_sender,
            stopped: AtomicBool::new(false),
            shared,
            async_handle: Mutex::new(handle),
        }
    }

    /// Single emit path for every level
    ///
    /// Severities outside the five levels are accepted here and rendered as
    /// `CUSTOM`; the public operations can only produce the five levels.
    pub(crate) fn emit(&self, severity: i32, origin: &str, operation: &str, payload: &dyn Display) {
        let metrics = &self.shared.metrics;
        if !self.threshold.admits(severity) {
            metrics.record_filtered();
            return;
        }

        // Registered before the stopped and alive checks; a draining or dying writer waits for it
        let _in_flight = InFlight::enter(&self.shared.in_flight);
        if self.stopped.load(Ordering::SeqCst) {
            metrics.record_rejected();
            return;
        }
        if !self.shared.is_alive() {
            metrics.record_dropped();
            return;
        }

        let message = Message::with_severity(severity, origin, operation, payload.to_string());
        self.send_message(message);
    }

    /// Enqueue a message, blocking while the queue is full
    fn send_message(&self, message: Message) {
        let metrics = &self.shared.metrics;
        match self.sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                metrics.record_block();
                // send() blocks until a slot frees or the writer is gone
                if self.sender.send(message).is_err() {
                    metrics.record_dropped();
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                metrics.record_dropped();
            }
        }
    }

    /// Log text at an arbitrary level
    pub fn log(&self, level: LogLevel, origin: &str, operation: &str, text: impl AsRef<str>) {
        self.emit(level.value(), origin, operation, &text.as_ref());
    }

    /// Log an error at FATAL level, using its description as the payload
    #[inline]
    pub fn fatal(&self, origin: &str, operation: &str, error: &dyn Error) {
        self.emit(LogLevel::Fatal.value(), origin, operation, &error);
    }

    /// Log an error at ERROR level, using its description as the payload
    #[inline]
    pub fn error(&self, origin: &str, operation: &str, error: &dyn Error) {
        self.emit(LogLevel::Error.value(), origin, operation, &error);
    }

    #[inline]
    pub fn warning(&self, origin: &str, operation: &str, text: impl AsRef<str>) {
        self.log(LogLevel::Warning, origin, operation, text);
    }

    #[inline]
    pub fn info(&self, origin: &str, operation: &str, text: impl AsRef<str>) {
        self.log(LogLevel::Info, origin, operation, text);
    }

    #[inline]
    pub fn debug(&self, origin: &str, operation: &str, text: impl AsRef<str>) {
        self.log(LogLevel::Debug, origin, operation, text);
    }

    /// Signal the writer thread to finish
    ///
    /// Later emit calls are rejected. The writer drains whatever is already
    /// queued, closes the file and exits; this call does not wait for that.
    /// Calling `stop` more than once, or after the writer died, is a no-op.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        // Fails only when the writer is already gone
        let _ = self.stop_sender.try_send(());
    }

    /// Stop the logger and wait for the writer thread to close the file
    ///
    /// # Arguments
    ///
    /// * `timeout` - Maximum time to wait for queued messages to drain
    ///
    /// # Returns
    ///
    /// `true` if the writer finished within the timeout (or had already been
    /// joined), `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use journal_logger::{Logger, LogLevel};
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new("/tmp", LogLevel::Info);
    /// logger.info("main", "exit", "bye");
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.stop();

        let Some(handle) = self.async_handle.lock().take() else {
            return true;
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                // Thread finished, join it to check for panics
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Log writer thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Log writer thread did not finish within {:?}. \
                     Some logs may be lost.",
                    timeout
                );
                // keep the handle so a later shutdown can wait again
                *self.async_handle.lock() = Some(handle);
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Path of the log file, fixed at construction
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn queue_capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the writer thread is still running
    ///
    /// Turns false after a clean stop as well as after an I/O failure.
    pub fn is_alive(&self) -> bool {
        self.shared.is_alive()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Number of messages currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.sender.len()
    }

    /// Get the number of dropped logs
    ///
    /// Counts admitted messages that never reached the file because the
    /// writer failed or was gone.
    pub fn dropped_count(&self) -> u64 {
        self.shared.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        // Report any dropped logs
        let metrics = self.metrics();
        let dropped = metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use journal_logger::prelude::*;
///
/// let logger = Logger::builder("/var/log/myapp")
///     .threshold(LogLevel::Warning)
///     .queue_capacity(64)
///     .colors(false)
///     .build();
/// ```
pub struct LoggerBuilder {
    directory: PathBuf,
    threshold: Threshold,
    queue_capacity: usize,
    console: bool,
    colors: bool,
    output_format: OutputFormat,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            threshold: Threshold::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            console: true,
            colors: true,
            output_format: OutputFormat::default(),
            appenders: Vec::new(),
        }
    }

    /// Set the maximum severity value to record
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.threshold = threshold.into();
        self
    }

    /// Set the queue capacity; a capacity of zero is raised to one
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Enable or disable the console mirror
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enable or disable level colours on the console mirror
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Add an appender that receives every line after the file write
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Build the Logger and start its writer thread
    pub fn build(self) -> Logger {
        Logger::spawn(self)
    }
}
