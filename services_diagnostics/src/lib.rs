//! # Diagnostics Service
//!
//! Structured operator-visible diagnostic events.
//!
//! ## Philosophy
//!
//! Diagnostics are explicit and structured, not printf-style. The scheduler
//! core emits [`DiagEvent`]s through a [`DiagnosticSink`] and never decides
//! where they go; the daemon routes them to stderr, tests capture them in a
//! bounded buffer.
//!
//! Deadline misses are the canonical event: expected under overload,
//! warning-level, never fatal.

use core_types::TaskKind;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings (deadline misses land here)
    Warn,
    /// Errors
    Error,
}

impl DiagLevel {
    /// Rendered form: `DEBUG`, `INFO`, `WARN`, `ERROR`
    pub fn as_str(self) -> &'static str {
        match self {
            DiagLevel::Debug => "DEBUG",
            DiagLevel::Info => "INFO",
            DiagLevel::Warn => "WARN",
            DiagLevel::Error => "ERROR",
        }
    }
}

/// A structured diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagEvent {
    /// Severity
    pub level: DiagLevel,
    /// Task the event concerns, if any
    pub task: Option<TaskKind>,
    /// Event message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl DiagEvent {
    /// Creates a new event
    pub fn new(level: DiagLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            task: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates an informational event
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagLevel::Info, message)
    }

    /// Creates a warning event
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(DiagLevel::Warn, message)
    }

    /// Sets the task the event concerns
    pub fn with_task(mut self, task: TaskKind) -> Self {
        self.task = Some(task);
        self
    }

    /// Adds a structured field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for DiagEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level.as_str())?;
        if let Some(task) = self.task {
            write!(f, " {}:", task)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination for diagnostic events
pub trait DiagnosticSink: Send + Sync {
    /// Records one event
    fn record(&self, event: DiagEvent);
}

/// Bounded keep-latest event buffer
///
/// Holds the most recent `capacity` events; the oldest are evicted. Uses its
/// own internal lock, independent of any scheduler lock, so recording can
/// never contend with dispatch.
pub struct DiagnosticBuffer {
    capacity: usize,
    events: Mutex<VecDeque<DiagEvent>>,
}

impl DiagnosticBuffer {
    /// Creates a buffer holding at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Returns a copy of the buffered events, oldest first
    pub fn events(&self) -> Vec<DiagEvent> {
        self.lock().iter().cloned().collect()
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when no events are buffered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Events at or above `level`, oldest first
    pub fn events_at_least(&self, level: DiagLevel) -> Vec<DiagEvent> {
        self.lock()
            .iter()
            .filter(|e| e.level >= level)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<DiagEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn record(&self, event: DiagEvent) {
        let mut events = self.lock();
        if self.capacity == 0 {
            return;
        }
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that renders events to stderr, one line each
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn record(&self, event: DiagEvent) {
        eprintln!("{}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(DiagLevel::Debug < DiagLevel::Info);
        assert!(DiagLevel::Info < DiagLevel::Warn);
        assert!(DiagLevel::Warn < DiagLevel::Error);
    }

    #[test]
    fn test_event_builder() {
        let event = DiagEvent::warn("deadline missed")
            .with_task(TaskKind::EngineControl)
            .with_field("elapsed_ms", "80")
            .with_field("deadline_ms", "50");

        assert_eq!(event.level, DiagLevel::Warn);
        assert_eq!(event.task, Some(TaskKind::EngineControl));
        assert_eq!(event.fields.len(), 2);
    }

    #[test]
    fn test_event_display() {
        let event = DiagEvent::warn("deadline missed")
            .with_task(TaskKind::EngineControl)
            .with_field("elapsed_ms", "80");
        assert_eq!(
            event.to_string(),
            "[WARN] Engine Control: deadline missed elapsed_ms=80"
        );
    }

    #[test]
    fn test_event_display_without_task() {
        let event = DiagEvent::info("scheduler run started");
        assert_eq!(event.to_string(), "[INFO] scheduler run started");
    }

    #[test]
    fn test_buffer_keeps_latest() {
        let buffer = DiagnosticBuffer::new(2);
        buffer.record(DiagEvent::info("first"));
        buffer.record(DiagEvent::info("second"));
        buffer.record(DiagEvent::info("third"));

        let events = buffer.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "second");
        assert_eq!(events[1].message, "third");
    }

    #[test]
    fn test_buffer_zero_capacity_records_nothing() {
        let buffer = DiagnosticBuffer::new(0);
        buffer.record(DiagEvent::info("dropped"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_events_at_least_filters_by_level() {
        let buffer = DiagnosticBuffer::new(10);
        buffer.record(DiagEvent::info("start"));
        buffer.record(DiagEvent::warn("miss"));
        buffer.record(DiagEvent::info("tick"));

        let warnings = buffer.events_at_least(DiagLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "miss");
    }
}
