//! Bounded operator log shown by the status display.
//!
//! Every entry is also emitted as a `tracing` event at the same severity. The
//! ring buffer has its own lock and never shares one with the event buffer or
//! the pools.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;

use crate::util::clock::now_ms;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine progress.
    Info,
    /// Dropped or delayed work.
    Warn,
    /// Caller misuse or broken wiring.
    Error,
}

/// One retained message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Severity.
    pub severity: Severity,
    /// Message text.
    pub message: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[LOG] {}", self.message)
    }
}

/// Ring buffer keeping the most recent `capacity` messages in arrival order.
#[derive(Debug)]
pub struct EventLog {
    lines: Mutex<VecDeque<LogLine>>,
    capacity: usize,
}

impl EventLog {
    /// Create an empty log retaining `capacity` lines.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append an informational message.
    pub fn append(&self, message: impl Into<String>) {
        self.record(Severity::Info, message.into());
    }

    /// Append a warning.
    pub fn warn(&self, message: impl Into<String>) {
        self.record(Severity::Warn, message.into());
    }

    /// Append an error.
    pub fn error(&self, message: impl Into<String>) {
        self.record(Severity::Error, message.into());
    }

    fn record(&self, severity: Severity, message: String) {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Warn => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }

        let line = LogLine {
            severity,
            message,
            created_at_ms: now_ms(),
        };
        let mut lines = self.lines.lock();
        if lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Retained lines, oldest first.
    pub fn recent(&self) -> Vec<LogLine> {
        self.lines.lock().iter().cloned().collect()
    }

    /// Retained messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lines.lock().iter().map(|l| l.message.clone()).collect()
    }

    /// Whether any retained message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|l| l.message.contains(needle))
    }

    /// Maximum retained lines.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
