//! Background writer thread
//!
//! The worker is the only owner of the log file. It waits on two channels at
//! once, the message queue and the stop channel, and exits when asked to stop,
//! when every producer is gone, or when the file cannot be written.

use super::{
    appender::Appender, message::Message, metrics::LoggerMetrics, output_format::OutputFormat,
};
use crate::appenders::FileAppender;
use crossbeam_channel::{select, Receiver, RecvTimeoutError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long the drain waits for a producer that is still mid-send
const DRAIN_POLL: Duration = Duration::from_millis(5);

/// State shared between the logger handle and its writer thread
#[derive(Debug)]
pub(crate) struct Shared {
    /// False once the writer has exited, for whatever reason
    pub(crate) alive: AtomicBool,
    /// Producers between the stopped and alive checks and the end of their send
    pub(crate) in_flight: AtomicUsize,
    pub(crate) metrics: LoggerMetrics,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            in_flight: AtomicUsize::new(0),
            metrics: LoggerMetrics::new(),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Ordered with `in_flight` so a producer either sees the flag or is seen
    pub(crate) fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

/// Why the worker loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    Stopped,
    Disconnected,
    WriteFailed,
}

pub(crate) struct Worker {
    path: PathBuf,
    format: OutputFormat,
    mirrors: Vec<Box<dyn Appender>>,
    messages: Receiver<Message>,
    stop: Receiver<()>,
    shared: Arc<Shared>,
}

impl Worker {
    pub(crate) fn new(
        path: PathBuf,
        format: OutputFormat,
        mirrors: Vec<Box<dyn Appender>>,
        messages: Receiver<Message>,
        stop: Receiver<()>,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            path,
            format,
            mirrors,
            messages,
            stop,
            shared,
        }
    }

    /// Open the destination file and process messages until told to stop
    pub(crate) fn run(self) {
        match FileAppender::create(&self.path) {
            Ok(file) => {
                self.run_with(Box::new(file));
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Log writer could not start: {}", e);
                self.die();
            }
        }
    }

    /// Main loop over an already opened sink
    ///
    /// The sink is flushed and dropped exactly once, whichever way the loop ends.
    pub(crate) fn run_with(mut self, mut sink: Box<dyn Appender>) -> Exit {
        let exit = loop {
            select! {
                recv(self.messages) -> message => match message {
                    Ok(message) => {
                        if !self.write(sink.as_mut(), &message) {
                            break Exit::WriteFailed;
                        }
                    }
                    Err(_) => break Exit::Disconnected,
                },
                recv(self.stop) -> _ => {
                    if self.drain(sink.as_mut()) {
                        break Exit::Stopped;
                    }
                    break Exit::WriteFailed;
                }
            }
        };

        if exit != Exit::WriteFailed {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush {} on close: {}", sink.name(), e);
            }
        }
        drop(sink);

        for mirror in self.mirrors.iter_mut() {
            let _ = mirror.flush();
        }

        if exit == Exit::WriteFailed {
            self.die();
        } else {
            self.shared.mark_dead();
        }
        exit
    }

    /// Write everything accepted before the stop, used once a stop was requested
    ///
    /// Producers register in `in_flight` before checking the stopped flag, so
    /// once the counter reads zero every accepted message is already queued
    /// and every later producer sees the flag.
    fn drain(&mut self, sink: &mut dyn Appender) -> bool {
        loop {
            let idle = self.shared.in_flight.load(Ordering::SeqCst) == 0;
            while let Ok(message) = self.messages.try_recv() {
                if !self.write(sink, &message) {
                    return false;
                }
            }
            if idle {
                return true;
            }

            match self.messages.recv_timeout(DRAIN_POLL) {
                Ok(message) => {
                    if !self.write(sink, &message) {
                        return false;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return true,
            }
        }
    }

    /// Render one message, append it to the file, then mirror it
    ///
    /// Returns `false` when the file write failed and the worker must stop.
    fn write(&mut self, sink: &mut dyn Appender, message: &Message) -> bool {
        let line = self.format.render(message);

        // a line counts as written only once it left the buffer
        let result = sink.append(&line, message).and_then(|()| sink.flush());
        if let Err(e) = result {
            eprintln!(
                "[LOGGER ERROR] Failed to write to {} '{}': {}",
                sink.name(),
                self.path.display(),
                e
            );
            self.shared.metrics.record_dropped();
            return false;
        }
        self.shared.metrics.record_written();

        for mirror in self.mirrors.iter_mut() {
            if let Err(e) = mirror.append(&line, message) {
                eprintln!("[LOGGER WARNING] Mirror '{}' failed: {}", mirror.name(), e);
            }
        }
        true
    }

    /// Mark the logger dead and discard whatever is still queued
    ///
    /// Producers that already passed the alive check are waited for, so every
    /// message they enqueue is discarded and counted here. Producers arriving
    /// later see the flag and count their own drop.
    fn die(self) {
        self.shared.mark_dead();

        let mut discarded = 0u64;
        loop {
            let idle = self.shared.in_flight.load(Ordering::SeqCst) == 0;
            while self.messages.try_recv().is_ok() {
                self.shared.metrics.record_dropped();
                discarded += 1;
            }
            if idle {
                break;
            }

            match self.messages.recv_timeout(DRAIN_POLL) {
                Ok(_) => {
                    self.shared.metrics.record_dropped();
                    discarded += 1;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        if discarded > 0 {
            eprintln!(
                "[LOGGER WARNING] Log writer stopped, {} queued messages discarded",
                discarded
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LoggerError, Result};
    use crossbeam_channel::bounded;
    use parking_lot::Mutex;

    /// Collects lines in memory, optionally failing after a number of appends
    struct RecordingAppender {
        lines: Arc<Mutex<Vec<String>>>,
        fail_after: Option<usize>,
    }

    impl Appender for RecordingAppender {
        fn append(&mut self, line: &str, _message: &Message) -> Result<()> {
            let mut lines = self.lines.lock();
            if self.fail_after == Some(lines.len()) {
                return Err(LoggerError::writer("disk full"));
            }
            lines.push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FailingMirror;

    impl Appender for FailingMirror {
        fn append(&mut self, _line: &str, _message: &Message) -> Result<()> {
            Err(LoggerError::writer("console gone"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Harness {
        worker: Worker,
        messages: crossbeam_channel::Sender<Message>,
        stop: crossbeam_channel::Sender<()>,
        shared: Arc<Shared>,
    }

    fn harness(capacity: usize, mirrors: Vec<Box<dyn Appender>>) -> Harness {
        let (messages, message_rx) = bounded(capacity);
        let (stop, stop_rx) = bounded(1);
        let shared = Arc::new(Shared::new());
        let worker = Worker::new(
            PathBuf::from("memory.log"),
            OutputFormat::Text,
            mirrors,
            message_rx,
            stop_rx,
            Arc::clone(&shared),
        );
        Harness {
            worker,
            messages,
            stop,
            shared,
        }
    }

    fn recording(fail_after: Option<usize>) -> (Box<dyn Appender>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let appender = RecordingAppender {
            lines: Arc::clone(&lines),
            fail_after,
        };
        (Box::new(appender), lines)
    }

    fn payloads(lines: &Mutex<Vec<String>>) -> Vec<String> {
        lines
            .lock()
            .iter()
            .map(|line| line.rsplit(" | ").next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_stop_drains_queued_messages_in_order() {
        let h = harness(16, Vec::new());
        for i in 0..5 {
            h.messages
                .send(Message::new(LogLevel::Info, "svc", "op", format!("m{}", i)))
                .unwrap();
        }
        h.stop.send(()).unwrap();

        let (sink, lines) = recording(None);
        let exit = h.worker.run_with(sink);

        assert_eq!(exit, Exit::Stopped);
        assert_eq!(payloads(&lines), vec!["m0", "m1", "m2", "m3", "m4"]);
        assert_eq!(h.shared.metrics.total_written(), 5);
        assert!(!h.shared.is_alive());
    }

    #[test]
    fn test_drain_waits_for_producer_mid_send() {
        let h = harness(16, Vec::new());
        h.shared.in_flight.fetch_add(1, Ordering::SeqCst);
        h.stop.send(()).unwrap();

        let (sink, lines) = recording(None);
        let worker = h.worker;
        let writer = std::thread::spawn(move || worker.run_with(sink));

        std::thread::sleep(Duration::from_millis(50));
        h.messages
            .send(Message::new(LogLevel::Info, "svc", "op", "late but accepted"))
            .unwrap();
        h.shared.in_flight.fetch_sub(1, Ordering::SeqCst);

        assert_eq!(writer.join().unwrap(), Exit::Stopped);
        assert_eq!(payloads(&lines), vec!["late but accepted"]);
    }

    #[test]
    fn test_write_failure_kills_worker_and_counts_drops() {
        let h = harness(16, Vec::new());
        for i in 0..3 {
            h.messages
                .send(Message::new(LogLevel::Error, "svc", "op", format!("m{}", i)))
                .unwrap();
        }

        let (sink, lines) = recording(Some(1));
        let exit = h.worker.run_with(sink);

        assert_eq!(exit, Exit::WriteFailed);
        assert_eq!(lines.lock().len(), 1);
        assert_eq!(h.shared.metrics.total_written(), 1);
        // the failed message plus the one left in the queue
        assert_eq!(h.shared.metrics.dropped_count(), 2);
        assert!(!h.shared.is_alive());

        // the receiver is gone, so producers are never blocked again
        let late = Message::new(LogLevel::Error, "svc", "op", "late");
        assert!(h.messages.send(late).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unflushable_file_mirrors_and_counts_nothing() {
        let (mirror, mirrored) = recording(None);
        let h = harness(16, vec![mirror]);
        for i in 0..3 {
            h.messages
                .send(Message::new(LogLevel::Info, "svc", "op", format!("m{}", i)))
                .unwrap();
        }

        // every write to /dev/full fails with ENOSPC once the buffer is flushed
        let sink = FileAppender::create("/dev/full").expect("Failed to open /dev/full");
        let exit = h.worker.run_with(Box::new(sink));

        assert_eq!(exit, Exit::WriteFailed);
        assert!(mirrored.lock().is_empty());
        assert_eq!(h.shared.metrics.total_written(), 0);
        assert_eq!(h.shared.metrics.dropped_count(), 3);
    }

    #[test]
    fn test_dead_worker_counts_message_sent_mid_shutdown() {
        let h = harness(16, Vec::new());
        h.messages
            .send(Message::new(LogLevel::Error, "svc", "op", "fails"))
            .unwrap();
        // a producer that passed the alive check but has not sent yet
        h.shared.in_flight.fetch_add(1, Ordering::SeqCst);

        let (sink, lines) = recording(Some(0));
        let worker = h.worker;
        let writer = std::thread::spawn(move || worker.run_with(sink));

        std::thread::sleep(Duration::from_millis(50));
        assert!(!h.shared.is_alive());
        assert!(!writer.is_finished());

        h.messages
            .send(Message::new(LogLevel::Error, "svc", "op", "late"))
            .unwrap();
        h.shared.in_flight.fetch_sub(1, Ordering::SeqCst);

        assert_eq!(writer.join().unwrap(), Exit::WriteFailed);
        assert!(lines.lock().is_empty());
        assert_eq!(h.shared.metrics.dropped_count(), 2);
        assert!(h.messages.send(Message::new(LogLevel::Error, "svc", "op", "x")).is_err());
    }

    #[test]
    fn test_mirror_failure_keeps_worker_running() {
        let h = harness(16, vec![Box::new(FailingMirror)]);
        for i in 0..3 {
            h.messages
                .send(Message::new(LogLevel::Warning, "svc", "op", format!("m{}", i)))
                .unwrap();
        }
        drop(h.messages);

        let (sink, lines) = recording(None);
        let exit = h.worker.run_with(sink);

        assert_eq!(exit, Exit::Disconnected);
        assert_eq!(lines.lock().len(), 3);
        assert_eq!(h.shared.metrics.dropped_count(), 0);
    }

    #[test]
    fn test_open_failure_marks_logger_dead() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let (_messages, message_rx) = bounded::<Message>(4);
        let (_stop, stop_rx) = bounded(1);
        let shared = Arc::new(Shared::new());
        let worker = Worker::new(
            temp_dir.path().join("no").join("such").join("dir.log"),
            OutputFormat::Text,
            Vec::new(),
            message_rx,
            stop_rx,
            Arc::clone(&shared),
        );

        worker.run();
        assert!(!shared.is_alive());
    }
}
