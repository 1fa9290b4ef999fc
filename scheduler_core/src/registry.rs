//! Task registry: the fixed arena of task records
//!
//! One record per [`TaskKind`], indexed by the kind's stable registry index.
//! The registry is deliberately a plain arena behind the runtime's single
//! lock rather than per-task cells: the dispatcher's priority scan needs a
//! consistent cross-task view.

use core_types::{DeadlineOutcome, TaskKind, TaskParams, TaskSpec, TaskStats, TaskStatus};
use timer_hal::{Duration, Instant};

/// Mutable runtime record for one task
#[derive(Debug, Clone)]
pub struct TaskRecord {
    /// Which critical function this record tracks
    pub kind: TaskKind,
    /// Fixed priority rank; lower dispatches first
    pub priority: u32,
    /// Live configuration, re-read at release re-arm and frozen at dispatch
    pub params: TaskParams,
    /// Participates in scheduling
    pub enabled: bool,
    /// Period has elapsed and the task awaits dispatch (level signal)
    pub ready: bool,
    /// Currently executing
    pub running: bool,
    /// Start of the current or most recent execution
    pub last_started_at: Option<Instant>,
    /// Measured duration of the most recent completed execution
    pub last_exec_duration: Option<Duration>,
    /// Outcome of the most recent completed execution, frozen at completion
    pub last_outcome: Option<DeadlineOutcome>,
    /// Monotonic deadline-compliance counters
    pub stats: TaskStats,
}

impl TaskRecord {
    fn from_spec(spec: TaskSpec) -> Self {
        Self {
            kind: spec.kind,
            priority: spec.priority,
            params: spec.params,
            enabled: spec.enabled,
            ready: false,
            running: false,
            last_started_at: None,
            last_exec_duration: None,
            last_outcome: None,
            stats: TaskStats::default(),
        }
    }

    /// Externally visible status
    pub fn status(&self) -> TaskStatus {
        if self.running {
            TaskStatus::Executing
        } else if self.enabled {
            TaskStatus::Ready
        } else {
            TaskStatus::Disabled
        }
    }
}

/// Fixed arena of task records
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    records: [TaskRecord; TaskKind::COUNT],
}

impl TaskRegistry {
    /// Builds the registry from admitted specs
    pub fn new(specs: [TaskSpec; TaskKind::COUNT]) -> Self {
        Self {
            records: specs.map(TaskRecord::from_spec),
        }
    }

    /// Returns the record for a kind
    pub fn get(&self, kind: TaskKind) -> &TaskRecord {
        &self.records[kind.index()]
    }

    /// Returns the mutable record for a kind
    pub fn get_mut(&mut self, kind: TaskKind) -> &mut TaskRecord {
        &mut self.records[kind.index()]
    }

    /// Iterates records in registry-index order
    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter()
    }

    /// One dispatch decision: the highest-priority ready candidate
    ///
    /// Candidate set is `enabled ∧ ¬running ∧ ready`; the numerically
    /// smallest priority wins, ties to the smallest registry index.
    pub fn select_candidate(&self) -> Option<TaskKind> {
        self.records
            .iter()
            .filter(|r| r.enabled && !r.running && r.ready)
            .min_by_key(|r| (r.priority, r.kind.index()))
            .map(|r| r.kind)
    }

    /// Number of records with `running == true` (0 or 1 by invariant)
    pub fn running_count(&self) -> usize {
        self.records.iter().filter(|r| r.running).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::default_specs;

    fn registry() -> TaskRegistry {
        TaskRegistry::new(default_specs())
    }

    #[test]
    fn test_fresh_registry_has_no_candidates() {
        assert_eq!(registry().select_candidate(), None);
    }

    #[test]
    fn test_select_prefers_lowest_priority_value() {
        let mut registry = registry();
        registry.get_mut(TaskKind::Navigation).ready = true;
        registry.get_mut(TaskKind::EngineControl).ready = true;

        assert_eq!(
            registry.select_candidate(),
            Some(TaskKind::EngineControl)
        );
    }

    #[test]
    fn test_select_skips_disabled_and_running() {
        let mut registry = registry();
        registry.get_mut(TaskKind::FlightAttitude).ready = true;
        registry.get_mut(TaskKind::FlightAttitude).enabled = false;
        registry.get_mut(TaskKind::EngineControl).ready = true;
        registry.get_mut(TaskKind::EngineControl).running = true;
        registry.get_mut(TaskKind::Communication).ready = true;

        assert_eq!(
            registry.select_candidate(),
            Some(TaskKind::Communication)
        );
    }

    #[test]
    fn test_priority_tie_breaks_to_lowest_index() {
        let mut registry = registry();
        registry.get_mut(TaskKind::Navigation).priority = 9;
        registry.get_mut(TaskKind::Communication).priority = 9;
        registry.get_mut(TaskKind::Navigation).ready = true;
        registry.get_mut(TaskKind::Communication).ready = true;

        assert_eq!(registry.select_candidate(), Some(TaskKind::Navigation));
    }

    #[test]
    fn test_status_mapping() {
        let mut registry = registry();
        assert_eq!(
            registry.get(TaskKind::FlightAttitude).status(),
            TaskStatus::Ready
        );

        registry.get_mut(TaskKind::FlightAttitude).running = true;
        assert_eq!(
            registry.get(TaskKind::FlightAttitude).status(),
            TaskStatus::Executing
        );

        registry.get_mut(TaskKind::FlightAttitude).running = false;
        registry.get_mut(TaskKind::FlightAttitude).enabled = false;
        assert_eq!(
            registry.get(TaskKind::FlightAttitude).status(),
            TaskStatus::Disabled
        );
    }
}
