//! Task identity, configuration, and statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use timer_hal::Duration;

/// Stable type tag for each critical avionics function
///
/// The task universe is fixed at compile time. The discriminant doubles as
/// the stable registry index; iteration order of [`TaskKind::ALL`] is the
/// index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Flight attitude monitoring (highest priority)
    FlightAttitude,
    /// Engine monitoring and control
    EngineControl,
    /// GPS/INS navigation updates
    Navigation,
    /// Radio communication
    Communication,
    /// Non-critical cabin systems (lowest priority)
    CabinSystems,
}

impl TaskKind {
    /// Number of configured tasks
    pub const COUNT: usize = 5;

    /// All task kinds, in registry-index order
    pub const ALL: [TaskKind; Self::COUNT] = [
        TaskKind::FlightAttitude,
        TaskKind::EngineControl,
        TaskKind::Navigation,
        TaskKind::Communication,
        TaskKind::CabinSystems,
    ];

    /// Returns the stable registry index of this kind
    pub fn index(self) -> usize {
        match self {
            TaskKind::FlightAttitude => 0,
            TaskKind::EngineControl => 1,
            TaskKind::Navigation => 2,
            TaskKind::Communication => 3,
            TaskKind::CabinSystems => 4,
        }
    }

    /// Returns the kind at a registry index, if in range
    pub fn from_index(index: usize) -> Option<TaskKind> {
        Self::ALL.get(index).copied()
    }

    /// Returns the human-readable display name
    pub fn display_name(self) -> &'static str {
        match self {
            TaskKind::FlightAttitude => "Flight Attitude Monitor",
            TaskKind::EngineControl => "Engine Control",
            TaskKind::Navigation => "Navigation System",
            TaskKind::Communication => "Communication System",
            TaskKind::CabinSystems => "Cabin Systems",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Live-retunable per-task configuration
///
/// Operators may change these between releases; the release scheduler
/// re-reads `period` at each re-arm, and the execution engine freezes
/// `deadline` and `workload` at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    /// Time between releases
    pub period: Duration,
    /// Maximum allowed execution time, measured from start of execution
    pub deadline: Duration,
    /// Simulated workload duration
    pub workload: Duration,
}

impl TaskParams {
    /// Creates params from millisecond values
    pub const fn from_millis(period_ms: u64, deadline_ms: u64, workload_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(period_ms),
            deadline: Duration::from_millis(deadline_ms),
            workload: Duration::from_millis(workload_ms),
        }
    }
}

/// Fixed identity plus initial configuration for one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Which critical function this task implements
    pub kind: TaskKind,
    /// Fixed priority rank; lower number = higher priority, unique per task
    pub priority: u32,
    /// Initial configuration
    pub params: TaskParams,
    /// Whether the task participates in scheduling at start
    pub enabled: bool,
}

/// Returns the default task set
///
/// Periods, deadlines, and workloads match the reference avionics
/// configuration; priority equals registry index.
pub fn default_specs() -> [TaskSpec; TaskKind::COUNT] {
    [
        TaskSpec {
            kind: TaskKind::FlightAttitude,
            priority: 0,
            params: TaskParams::from_millis(100, 50, 30),
            enabled: true,
        },
        TaskSpec {
            kind: TaskKind::EngineControl,
            priority: 1,
            params: TaskParams::from_millis(200, 100, 60),
            enabled: true,
        },
        TaskSpec {
            kind: TaskKind::Navigation,
            priority: 2,
            params: TaskParams::from_millis(500, 200, 120),
            enabled: true,
        },
        TaskSpec {
            kind: TaskKind::Communication,
            priority: 3,
            params: TaskParams::from_millis(1000, 400, 150),
            enabled: true,
        },
        TaskSpec {
            kind: TaskKind::CabinSystems,
            priority: 4,
            params: TaskParams::from_millis(2000, 800, 200),
            enabled: true,
        },
    ]
}

/// Deadline compliance of one completed execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineOutcome {
    /// Execution finished within the deadline frozen at dispatch
    Met,
    /// Execution overran the deadline frozen at dispatch
    Missed,
}

impl DeadlineOutcome {
    /// Classifies an elapsed execution time against a deadline
    pub fn classify(elapsed: Duration, deadline: Duration) -> Self {
        if elapsed <= deadline {
            DeadlineOutcome::Met
        } else {
            DeadlineOutcome::Missed
        }
    }

    /// Report wire form: `MET` or `MISSED`
    pub fn as_str(self) -> &'static str {
        match self {
            DeadlineOutcome::Met => "MET",
            DeadlineOutcome::Missed => "MISSED",
        }
    }
}

impl fmt::Display for DeadlineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Externally visible task status, as rendered in the status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Enabled and not currently executing
    Ready,
    /// Currently executing
    Executing,
    /// Not participating in scheduling
    Disabled,
}

impl TaskStatus {
    /// Report wire form: `READY`, `EXECUTING`, or `DISABLED`
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Ready => "READY",
            TaskStatus::Executing => "EXECUTING",
            TaskStatus::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monotonic deadline-compliance counters for one task
///
/// Counts only increase for the lifetime of a run; all state is discarded at
/// teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Executions that finished within their frozen deadline
    pub met_count: u64,
    /// Executions that overran their frozen deadline
    pub missed_count: u64,
    /// Executions started (incremented at dispatch, not completion)
    pub total_executions: u64,
}

impl TaskStats {
    /// Records the outcome of one completed execution
    pub fn record(&mut self, outcome: DeadlineOutcome) {
        match outcome {
            DeadlineOutcome::Met => self.met_count += 1,
            DeadlineOutcome::Missed => self.missed_count += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_index_in_order() {
        for (i, kind) in TaskKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(TaskKind::from_index(i), Some(*kind));
        }
        assert_eq!(TaskKind::from_index(TaskKind::COUNT), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(
            TaskKind::FlightAttitude.to_string(),
            "Flight Attitude Monitor"
        );
        assert_eq!(TaskKind::CabinSystems.to_string(), "Cabin Systems");
    }

    #[test]
    fn test_default_specs_cover_every_kind_once() {
        let specs = default_specs();
        assert_eq!(specs.len(), TaskKind::COUNT);
        for (i, spec) in specs.iter().enumerate() {
            assert_eq!(spec.kind.index(), i);
            assert!(spec.enabled);
        }
    }

    #[test]
    fn test_default_priorities_are_unique_and_rank_ordered() {
        let specs = default_specs();
        for (i, spec) in specs.iter().enumerate() {
            assert_eq!(spec.priority, i as u32);
        }
    }

    #[test]
    fn test_default_deadlines_within_periods() {
        for spec in default_specs() {
            assert!(spec.params.deadline <= spec.params.period);
            assert!(spec.params.workload <= spec.params.deadline);
        }
    }

    #[test]
    fn test_outcome_classification_boundary() {
        let deadline = Duration::from_millis(50);
        assert_eq!(
            DeadlineOutcome::classify(Duration::from_millis(50), deadline),
            DeadlineOutcome::Met
        );
        assert_eq!(
            DeadlineOutcome::classify(Duration::from_millis(51), deadline),
            DeadlineOutcome::Missed
        );
    }

    #[test]
    fn test_stats_record_is_monotonic() {
        let mut stats = TaskStats::default();
        stats.total_executions += 1;
        stats.record(DeadlineOutcome::Met);
        stats.total_executions += 1;
        stats.record(DeadlineOutcome::Missed);

        assert_eq!(stats.met_count, 1);
        assert_eq!(stats.missed_count, 1);
        assert_eq!(stats.total_executions, 2);
    }

    #[test]
    fn test_status_wire_forms() {
        assert_eq!(TaskStatus::Ready.as_str(), "READY");
        assert_eq!(TaskStatus::Executing.as_str(), "EXECUTING");
        assert_eq!(TaskStatus::Disabled.as_str(), "DISABLED");
    }
}
