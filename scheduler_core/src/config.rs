//! Scheduler configuration

use crate::error::SchedulerError;
use core_types::{default_specs, TaskKind, TaskParams, TaskSpec};
use timer_hal::Duration;

/// Default dispatch poll cadence, an order of magnitude below the fastest
/// default task period
pub const DEFAULT_DISPATCH_INTERVAL: Duration = Duration::from_millis(10);

/// Default execution log capacity
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Complete scheduler configuration
///
/// Built from defaults and adjusted with the `with_*` builders; validated on
/// admission by [`crate::SchedulerRuntime::new`]. Task periods, deadlines,
/// and workloads remain live-retunable after admission; the task set,
/// priorities, dispatch interval, run limit, and log capacity do not.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// One spec per task kind, stored at its registry index
    pub specs: [TaskSpec; TaskKind::COUNT],
    /// Dispatch poll cadence
    pub dispatch_interval: Duration,
    /// Total runtime limit; `None` runs until externally stopped
    pub run_limit: Option<Duration>,
    /// Execution log capacity
    pub log_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            specs: default_specs(),
            dispatch_interval: DEFAULT_DISPATCH_INTERVAL,
            run_limit: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl SchedulerConfig {
    /// Replaces the initial params of one task
    pub fn with_params(mut self, kind: TaskKind, params: TaskParams) -> Self {
        self.specs[kind.index()].params = params;
        self
    }

    /// Sets the initial enabled flag of one task
    pub fn with_enabled(mut self, kind: TaskKind, enabled: bool) -> Self {
        self.specs[kind.index()].enabled = enabled;
        self
    }

    /// Sets the dispatch poll cadence
    pub fn with_dispatch_interval(mut self, interval: Duration) -> Self {
        self.dispatch_interval = interval;
        self
    }

    /// Sets a total runtime limit
    pub fn with_run_limit(mut self, limit: Duration) -> Self {
        self.run_limit = Some(limit);
        self
    }

    /// Sets the execution log capacity
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Admission check: rejects configurations the dispatcher cannot serve
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.dispatch_interval.is_zero() {
            return Err(SchedulerError::ZeroDispatchInterval);
        }
        for (index, spec) in self.specs.iter().enumerate() {
            if spec.kind.index() != index {
                return Err(SchedulerError::MisplacedSpec(spec.kind));
            }
            if spec.params.period.is_zero() {
                return Err(SchedulerError::ZeroPeriod(spec.kind));
            }
        }
        for (index, spec) in self.specs.iter().enumerate() {
            for other in &self.specs[index + 1..] {
                if spec.priority == other.priority {
                    return Err(SchedulerError::DuplicatePriority(spec.priority));
                }
            }
        }
        Ok(())
    }
}
