//! Scheduler runtime: timer wiring and the execution engine
//!
//! A small fixed set of one-shot timer callbacks drives everything: one
//! release timer per task, one dispatch poll, and an optional run-limit
//! timer. Each callback re-arms itself at the end of its own firing, so no
//! timer is ever reentrant with itself; callbacks from different timers may
//! interleave arbitrarily with each other and with snapshot reads.
//!
//! Locking discipline: all shared mutable state sits behind `Core::state`.
//! Critical sections are short and never include the simulated workload
//! wait; timers are never armed or cancelled while the state lock is held.

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::exec_log::ExecutionLog;
use crate::registry::TaskRegistry;
use crate::snapshot::{SystemSnapshot, TaskSnapshot, LOG_WINDOW};
use core_types::{DeadlineOutcome, ExecRecord, RunId, TaskKind, TaskParams};
use services_diagnostics::{DiagEvent, DiagnosticSink};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use timer_hal::{Duration, Instant, TimerHandle, TimerService};

struct SchedulerState {
    registry: TaskRegistry,
    log: ExecutionLog,
    started: bool,
    finished: bool,
    started_at: Instant,
}

/// Pending timer handles, kept so the finished transition can cancel them
struct HandleTable {
    releases: [Option<TimerHandle>; TaskKind::COUNT],
    dispatch: Option<TimerHandle>,
    run_limit: Option<TimerHandle>,
}

impl HandleTable {
    fn new() -> Self {
        Self {
            releases: [None; TaskKind::COUNT],
            dispatch: None,
            run_limit: None,
        }
    }

    fn drain(&mut self) -> Vec<TimerHandle> {
        let mut handles = Vec::new();
        for slot in self.releases.iter_mut() {
            handles.extend(slot.take());
        }
        handles.extend(self.dispatch.take());
        handles.extend(self.run_limit.take());
        handles
    }
}

/// Everything the timer callbacks need, shared behind one `Arc`
struct Core {
    timer: Arc<dyn TimerService>,
    diagnostics: Arc<dyn DiagnosticSink>,
    state: Mutex<SchedulerState>,
    handles: Mutex<HandleTable>,
    run_id: RunId,
    dispatch_interval: Duration,
    run_limit: Option<Duration>,
}

impl Core {
    fn state(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handles(&self) -> MutexGuard<'_, HandleTable> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The scheduler runtime
///
/// Owns the task registry, the execution log, and the timer wiring. All
/// methods are callable from any thread; reads and writes go through the
/// single internal lock.
pub struct SchedulerRuntime {
    core: Arc<Core>,
}

impl SchedulerRuntime {
    /// Admits a configuration and builds an idle runtime
    ///
    /// Nothing is armed until [`start`](Self::start) is called.
    pub fn new(
        config: SchedulerConfig,
        timer: Arc<dyn TimerService>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        let started_at = timer.now();
        let core = Arc::new(Core {
            timer,
            diagnostics,
            state: Mutex::new(SchedulerState {
                registry: TaskRegistry::new(config.specs),
                log: ExecutionLog::new(config.log_capacity),
                started: false,
                finished: false,
                started_at,
            }),
            handles: Mutex::new(HandleTable::new()),
            run_id: RunId::new(),
            dispatch_interval: config.dispatch_interval,
            run_limit: config.run_limit,
        });
        Ok(Self { core })
    }

    /// Arms the release timers, the dispatch poll, and the run limit
    ///
    /// Every task's first release lands at `start + period`. Calling `start`
    /// again, or after the run has finished, is a no-op.
    pub fn start(&self) {
        let now = self.core.timer.now();
        let initial_periods = {
            let mut state = self.core.state();
            if state.started || state.finished {
                return;
            }
            state.started = true;
            state.started_at = now;
            let mut periods = [Duration::ZERO; TaskKind::COUNT];
            for kind in TaskKind::ALL {
                periods[kind.index()] = state.registry.get(kind).params.period;
            }
            periods
        };

        self.core.diagnostics.record(
            DiagEvent::info("scheduler run started")
                .with_field("run_id", self.core.run_id.to_string())
                .with_field("tasks", TaskKind::COUNT.to_string())
                .with_field(
                    "dispatch_interval_ms",
                    self.core.dispatch_interval.as_millis().to_string(),
                ),
        );

        for kind in TaskKind::ALL {
            arm_release(&self.core, kind, initial_periods[kind.index()]);
        }
        arm_dispatch(&self.core, self.core.dispatch_interval);

        if let Some(limit) = self.core.run_limit {
            let core = Arc::clone(&self.core);
            let handle = self
                .core
                .timer
                .schedule_once(limit, Box::new(move || finish(&core, "run limit reached")));
            self.core.handles().run_limit = Some(handle);
        }
    }

    /// External shutdown: the same terminal transition as the run limit
    ///
    /// Accumulated state stays intact for final reporting.
    pub fn stop(&self) {
        finish(&self.core, "stopped");
    }

    /// Returns true once the terminal finished transition has happened
    pub fn is_finished(&self) -> bool {
        self.core.state().finished
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.core.run_id
    }

    /// Replaces a task's live params
    ///
    /// The new period takes effect at that task's next release re-arm; an
    /// in-flight wait is not retimed. Deadline and workload take effect at
    /// the next dispatch; an in-flight execution keeps its frozen values.
    pub fn retune(&self, kind: TaskKind, params: TaskParams) -> Result<(), SchedulerError> {
        if params.period.is_zero() {
            return Err(SchedulerError::ZeroPeriod(kind));
        }
        self.core.state().registry.get_mut(kind).params = params;
        Ok(())
    }

    /// Sets a task's enabled flag
    pub fn set_enabled(&self, kind: TaskKind, enabled: bool) {
        self.core.state().registry.get_mut(kind).enabled = enabled;
    }

    /// Captures a consistent snapshot of the whole system
    pub fn snapshot(&self) -> SystemSnapshot {
        let state = self.core.state();
        SystemSnapshot {
            run_id: self.core.run_id,
            scheduler_running: state.started && !state.finished,
            finished: state.finished,
            run_limit: self.core.run_limit,
            log_len: state.log.len(),
            tasks: state.registry.iter().map(TaskSnapshot::from_record).collect(),
            log_window: state.log.window(LOG_WINDOW).to_vec(),
        }
    }

    /// Copies the full execution log, oldest first
    pub fn export_log(&self) -> Vec<ExecRecord> {
        self.core.state().log.records().to_vec()
    }
}

fn arm_release(core: &Arc<Core>, kind: TaskKind, delay: Duration) {
    let callback_core = Arc::clone(core);
    let handle = core
        .timer
        .schedule_once(delay, Box::new(move || on_release(&callback_core, kind)));
    core.handles().releases[kind.index()] = Some(handle);
}

/// Period boundary for one task: raise readiness, re-arm at the live period
///
/// Readiness is a level signal: releasing an already-ready task is
/// idempotent, so a starved task never accumulates a backlog.
fn on_release(core: &Arc<Core>, kind: TaskKind) {
    let next_period = {
        let mut state = core.state();
        if state.finished {
            return;
        }
        let record = state.registry.get_mut(kind);
        record.ready = true;
        record.params.period
    };
    arm_release(core, kind, next_period);
}

fn arm_dispatch(core: &Arc<Core>, delay: Duration) {
    let callback_core = Arc::clone(core);
    let handle = core
        .timer
        .schedule_once(delay, Box::new(move || on_dispatch(&callback_core)));
    core.handles().dispatch = Some(handle);
}

/// One dispatch decision per poll tick
///
/// At most one task is started per tick; a task that becomes ready while
/// this tick's selection executes waits for the next tick. The next poll is
/// armed only after the synchronous execution returns.
fn on_dispatch(core: &Arc<Core>) {
    let candidate = {
        let state = core.state();
        if state.finished {
            return;
        }
        state.registry.select_candidate()
    };

    if let Some(kind) = candidate {
        execute(core, kind);
    }

    // The run limit may have fired while the selected task executed.
    if core.state().finished {
        return;
    }
    arm_dispatch(core, core.dispatch_interval);
}

/// Runs one task to completion and commits its deadline accounting
fn execute(core: &Arc<Core>, kind: TaskKind) {
    let start = core.timer.now();
    let (frozen_deadline, frozen_workload) = {
        let mut state = core.state();
        if state.finished {
            return;
        }
        let record = state.registry.get_mut(kind);
        // A release, retune, or disable may have slipped in between
        // selection and this claim; losing that race is benign.
        if !record.enabled || record.running || !record.ready {
            return;
        }
        record.running = true;
        record.ready = false;
        record.last_started_at = Some(start);
        record.stats.total_executions += 1;
        (record.params.deadline, record.params.workload)
    };

    // The workload wait runs with the lock released; other timers fire
    // freely against this window.
    core.timer.busy_wait(frozen_workload);

    let elapsed = core.timer.now().duration_since(start);
    let outcome = DeadlineOutcome::classify(elapsed, frozen_deadline);

    {
        let mut state = core.state();
        let started_at = state.started_at;
        let finished = state.finished;
        {
            let record = state.registry.get_mut(kind);
            record.stats.record(outcome);
            record.last_exec_duration = Some(elapsed);
            record.last_outcome = Some(outcome);
            // Cleared last: a reader can never observe running == false
            // alongside half-committed statistics.
            record.running = false;
        }
        if !finished {
            state.log.append(ExecRecord {
                task: kind,
                start_offset: start.duration_since(started_at),
                duration: elapsed,
                deadline_met: outcome == DeadlineOutcome::Met,
            });
        }
    }

    if outcome == DeadlineOutcome::Missed {
        core.diagnostics.record(
            DiagEvent::warn("deadline missed")
                .with_task(kind)
                .with_field("elapsed_ms", elapsed.as_millis().to_string())
                .with_field("deadline_ms", frozen_deadline.as_millis().to_string()),
        );
    }
}

/// The terminal transition: no new releases, dispatches, or log entries
///
/// Work already in flight completes; its statistics still commit.
fn finish(core: &Arc<Core>, reason: &str) {
    let log_len = {
        let mut state = core.state();
        if state.finished {
            return;
        }
        state.finished = true;
        state.log.len()
    };

    let pending = core.handles().drain();
    for handle in pending {
        core.timer.cancel(handle);
    }

    core.diagnostics.record(
        DiagEvent::info("scheduler run finished")
            .with_field("reason", reason)
            .with_field("executions_logged", log_len.to_string()),
    );
}
