//! Structured log sink for the gateway façade.
//!
//! Library internals emit `tracing` events; the façade additionally reports
//! each operation to an injectable [`Logger`] so embedding applications can
//! route wallet activity wherever they like. [`NullLogger`] discards
//! everything and is the default.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;

/// Structured context attached to a log record.
pub type LogContext = Map<String, Value>;

/// Log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Runtime errors.
    Error,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Interesting events.
    Info,
    /// Detailed debug information.
    Debug,
}

impl LogLevel {
    /// Returns the lower-case level name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log sink with one convenience method per level.
///
/// Implementors provide [`log`](Self::log); the rest forward to it.
pub trait Logger: Send + Sync {
    /// Records a message at `level`.
    fn log(&self, level: LogLevel, message: &str, context: &LogContext);

    /// Records an emergency.
    fn emergency(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Emergency, message, context);
    }

    /// Records an alert.
    fn alert(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Alert, message, context);
    }

    /// Records a critical condition.
    fn critical(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Critical, message, context);
    }

    /// Records an error.
    fn error(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Error, message, context);
    }

    /// Records a warning.
    fn warning(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Warning, message, context);
    }

    /// Records a notice.
    fn notice(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Notice, message, context);
    }

    /// Records an informational message.
    fn info(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Info, message, context);
    }

    /// Records a debug message.
    fn debug(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Debug, message, context);
    }
}

/// Logger that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: &LogContext) {}
}

/// A record captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
    /// Attached context.
    pub context: LogContext,
}

/// Logger that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the captured records.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Returns the records captured at `level`.
    #[must_use]
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Drops every captured record.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        self.entries.lock().push(LogEntry {
            level,
            message: message.to_string(),
            context: context.clone(),
        });
    }
}
