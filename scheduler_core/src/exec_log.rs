//! Bounded append-only execution log
//!
//! Capacity policy: once full, new entries are silently dropped. The oldest
//! entries are never evicted: the log records the beginning of the run, it
//! is not a sliding window.

use core_types::ExecRecord;

/// Append-only trace of completed executions
#[derive(Debug, Clone)]
pub struct ExecutionLog {
    capacity: usize,
    entries: Vec<ExecRecord>,
}

impl ExecutionLog {
    /// Creates a log holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record; returns false when the log is full and dropped it
    pub fn append(&mut self, record: ExecRecord) -> bool {
        if self.entries.len() >= self.capacity {
            return false;
        }
        self.entries.push(record);
        true
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true once the capacity has been reached
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All recorded entries, oldest first
    pub fn records(&self) -> &[ExecRecord] {
        &self.entries
    }

    /// The most recent `count` entries, oldest first
    pub fn window(&self, count: usize) -> &[ExecRecord] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TaskKind;
    use timer_hal::Duration;

    fn record(start_ms: u64) -> ExecRecord {
        ExecRecord {
            task: TaskKind::FlightAttitude,
            start_offset: Duration::from_millis(start_ms),
            duration: Duration::from_millis(30),
            deadline_met: true,
        }
    }

    #[test]
    fn test_append_until_full_then_drop() {
        let mut log = ExecutionLog::new(2);
        assert!(log.append(record(100)));
        assert!(log.append(record(200)));
        assert!(log.is_full());
        assert!(!log.append(record(300)));

        // The beginning of the run survives; the overflow entry is gone.
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].start_offset.as_millis(), 100);
        assert_eq!(log.records()[1].start_offset.as_millis(), 200);
    }

    #[test]
    fn test_window_returns_most_recent() {
        let mut log = ExecutionLog::new(10);
        for start in [100, 200, 300, 400] {
            log.append(record(start));
        }

        let window = log.window(2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].start_offset.as_millis(), 300);
        assert_eq!(window[1].start_offset.as_millis(), 400);
    }

    #[test]
    fn test_window_larger_than_log_returns_all() {
        let mut log = ExecutionLog::new(10);
        log.append(record(100));
        assert_eq!(log.window(50).len(), 1);
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let mut log = ExecutionLog::new(0);
        assert!(!log.append(record(100)));
        assert!(log.is_empty());
    }
}
