//! HTTP log adapter
//!
//! When debug is enabled, the transport records every request/response pair
//! here, separately from `tracing` output, so callers can inspect exactly
//! what went over the wire.

use std::fmt;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::Level;

/// One recorded log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub context: Map<String, Value>,
}

/// Sink for HTTP request/response traces
pub trait HttpLogger: Send + Sync + fmt::Debug {
    /// Record one entry.
    fn log(&self, level: Level, message: &str, context: Map<String, Value>);

    /// All entries recorded so far, oldest first.
    fn logs(&self) -> Vec<LogEntry>;

    /// Drop all recorded entries.
    fn clear(&self);
}

/// Stores all log entries in memory
#[derive(Debug, Default)]
pub struct ArrayLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl ArrayLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpLogger for ArrayLogger {
    fn log(&self, level: Level, message: &str, context: Map<String, Value>) {
        self.entries.lock().push(LogEntry { level, message: message.to_string(), context });
    }

    fn logs(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}
