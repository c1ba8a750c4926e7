//! Leveled logger construction.
//!
//! # Responsibilities
//! - Resolve the configured level name (unknown names fall back to debug)
//! - Open the destination: stdout, or a file in append mode
//! - Build a `tracing` dispatcher with the relay line format
//!
//! # Design Decisions
//! - The logger is a value handed to components, not global state
//! - Messages below the minimum severity are dropped at emission
//! - File writes go through a mutex so concurrent lines never interleave

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use crate::observability::format::LineFormat;
use crate::observability::level::Severity;

const TARGET: &str = "statsd_ha_proxy";

/// Error type for logger construction.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("can't open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stdout,
    File(PathBuf),
}

impl LogDestination {
    /// `"stdout"` and `""` select standard output; anything else is a path.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "stdout" => LogDestination::Stdout,
            path => LogDestination::File(PathBuf::from(path)),
        }
    }

    /// Build a logger writing to this destination.
    pub fn open(&self, level: Severity) -> Result<Logger, LogError> {
        match self {
            LogDestination::Stdout => Ok(Logger::from_writer(level, io::stdout, true)),
            LogDestination::File(path) => {
                let file = open_append(path).map_err(|source| LogError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Logger::from_writer(level, Mutex::new(file), false))
            }
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// Construct the process logger from the configured destination and level.
pub fn new_logger(destination: &str, level_name: &str) -> Result<Logger, LogError> {
    LogDestination::parse(destination).open(Severity::resolve(level_name))
}

/// A leveled logger handle.
///
/// Cloning is cheap; all clones share the same sink.
#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
    level: Severity,
}

impl Logger {
    /// Build a logger on any `MakeWriter`.
    ///
    /// `ansi` enables per-severity coloring of whole lines.
    pub fn from_writer<W>(level: Severity, make_writer: W, ansi: bool) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(make_writer)
            .with_ansi(ansi)
            .with_filter(level.level_filter());
        let subscriber = tracing_subscriber::registry().with(layer);

        Self {
            dispatch: Dispatch::new(subscriber),
            level,
        }
    }

    /// Minimum severity that gets written.
    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level
    }

    pub fn log(&self, severity: Severity, message: &str) {
        if !self.enabled(severity) {
            return;
        }
        dispatcher::with_default(&self.dispatch, || emit(severity, message));
    }

    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn notice(&self, message: &str) {
        self.log(Severity::Notice, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }

    /// Run `f` with this logger as the thread's dispatcher, so plain
    /// `tracing` macros inside it land in the same sink.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this logger the current thread's dispatcher until the guard drops.
    pub fn set_default(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }
}

// `tracing` needs the level at compile time, hence one call per arm.
fn emit(severity: Severity, message: &str) {
    let name = severity.as_str();
    match severity {
        Severity::Debug => {
            tracing::event!(target: TARGET, Level::DEBUG, relay.severity = name, "{}", message)
        }
        Severity::Info | Severity::Notice => {
            tracing::event!(target: TARGET, Level::INFO, relay.severity = name, "{}", message)
        }
        Severity::Warning => {
            tracing::event!(target: TARGET, Level::WARN, relay.severity = name, "{}", message)
        }
        Severity::Error | Severity::Critical => {
            tracing::event!(target: TARGET, Level::ERROR, relay.severity = name, "{}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().unwrap();
            String::from_utf8(buf.clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn fields(line: &str) -> Vec<&str> {
        line.split('\t').collect()
    }

    #[test]
    fn parse_destination() {
        assert_eq!(LogDestination::parse("stdout"), LogDestination::Stdout);
        assert_eq!(LogDestination::parse(""), LogDestination::Stdout);
        assert_eq!(
            LogDestination::parse("/var/log/relay.log"),
            LogDestination::File(PathBuf::from("/var/log/relay.log"))
        );
    }

    #[test]
    fn drops_messages_below_level() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Notice, capture.clone(), false);

        logger.debug("d");
        logger.info("i");
        logger.notice("n");
        logger.warning("w");
        logger.error("e");
        logger.critical("c");

        let levels: Vec<String> = capture
            .lines()
            .iter()
            .map(|line| fields(line)[1].to_string())
            .collect();
        assert_eq!(levels, vec!["NOTICE", "WARNING", "ERROR", "CRITICAL"]);
    }

    #[test]
    fn line_has_timestamp_level_and_message() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Debug, capture.clone(), false);

        logger.info("backend statsite1:8125 is up");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let parts = fields(&lines[0]);
        assert_eq!(parts.len(), 3);
        assert!(
            chrono::NaiveDateTime::parse_from_str(parts[0], "%Y-%m-%d %H:%M:%S").is_ok(),
            "bad timestamp: {}",
            parts[0]
        );
        assert_eq!(parts[1], "INFO");
        assert_eq!(parts[2], "backend statsite1:8125 is up");
    }

    #[test]
    fn ansi_output_wraps_line_in_color() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Debug, capture.clone(), true);

        logger.error("boom");

        let line = &capture.lines()[0];
        assert!(line.starts_with("\x1b[31m"));
        assert!(line.ends_with("\x1b[0m"));
        assert!(line.contains("\tERROR\tboom"));
    }

    #[test]
    fn ansi_info_line_keeps_default_color() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Debug, capture.clone(), true);

        logger.info("listening");
        logger.notice("started");

        let lines = capture.lines();
        let info = &lines[0];
        assert!(!info.starts_with('\x1b'), "{info:?}");
        assert!(info.contains("\tINFO\tlistening"));
        assert!(info.ends_with("\x1b[0m"));
        assert!(lines[1].starts_with("\x1b[32m"));
    }

    #[test]
    fn caller_severity_field_does_not_replace_level() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Debug, capture.clone(), false);

        logger.in_scope(|| {
            tracing::warn!(severity = "CRITICAL", "queue backlog");
        });

        let lines = capture.lines();
        let parts = fields(&lines[0]);
        assert_eq!(parts[1], "WARNING");
        assert_eq!(parts[2], "queue backlog severity=CRITICAL");
    }

    #[test]
    fn plain_tracing_events_use_the_same_sink() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Info, capture.clone(), false);

        logger.in_scope(|| {
            tracing::debug!("hidden");
            tracing::warn!(backend = "statsite2:8125", "slow upstream");
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let parts = fields(&lines[0]);
        assert_eq!(parts[1], "WARNING");
        assert_eq!(parts[2], "slow upstream backend=statsite2:8125");
    }

    #[test]
    fn concurrent_lines_do_not_interleave() {
        let capture = Capture::default();
        let logger = Logger::from_writer(Severity::Debug, capture.clone(), false);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.info(&format!("worker {worker} line {i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = capture.lines();
        assert_eq!(lines.len(), 200);
        for line in lines {
            let parts = fields(&line);
            assert_eq!(parts.len(), 3, "mangled line: {line:?}");
            assert!(parts[2].starts_with("worker "));
        }
    }
}
