//! Consistent read-only views of scheduler state
//!
//! A snapshot is captured in one critical section of the same lock that
//! guards all mutation, so it can never observe a torn update; in
//! particular, never `running == false` with half-committed statistics.

use crate::registry::TaskRecord;
use core_types::{DeadlineOutcome, ExecRecord, RunId, TaskKind, TaskParams, TaskStats, TaskStatus};
use serde::{Deserialize, Serialize};
use timer_hal::Duration;

/// Bounded window of the execution log included in a snapshot
pub const LOG_WINDOW: usize = 50;

/// Point-in-time view of one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Task identity
    pub kind: TaskKind,
    /// Human-readable name
    pub name: String,
    /// Fixed priority rank
    pub priority: u32,
    /// Live configuration at capture time
    pub params: TaskParams,
    /// Externally visible status
    pub status: TaskStatus,
    /// Raw ready flag (released, awaiting dispatch)
    pub ready: bool,
    /// Raw running flag
    pub running: bool,
    /// Duration of the most recent completed execution
    pub last_exec_duration: Option<Duration>,
    /// Outcome of the most recent completed execution
    pub last_outcome: Option<DeadlineOutcome>,
    /// Deadline-compliance counters
    pub stats: TaskStats,
    /// Participates in scheduling
    pub enabled: bool,
}

impl TaskSnapshot {
    /// Captures one task record
    pub fn from_record(record: &TaskRecord) -> Self {
        Self {
            kind: record.kind,
            name: record.kind.display_name().to_string(),
            priority: record.priority,
            params: record.params,
            status: record.status(),
            ready: record.ready,
            running: record.running,
            last_exec_duration: record.last_exec_duration,
            last_outcome: record.last_outcome,
            stats: record.stats,
            enabled: record.enabled,
        }
    }
}

/// Point-in-time view of the whole system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Identifier of this scheduler run
    pub run_id: RunId,
    /// Scheduler has started and has not finished
    pub scheduler_running: bool,
    /// The terminal finished flag
    pub finished: bool,
    /// Configured total runtime limit, if any
    pub run_limit: Option<Duration>,
    /// Total entries recorded in the execution log
    pub log_len: usize,
    /// Every task, in registry-index order
    pub tasks: Vec<TaskSnapshot>,
    /// The most recent [`LOG_WINDOW`] execution log entries
    pub log_window: Vec<ExecRecord>,
}

impl SystemSnapshot {
    /// Number of configured tasks
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }
}
