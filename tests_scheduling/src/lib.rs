//! # Scheduling Test Support
//!
//! Shared helpers for the cross-crate scheduling tests. Every test drives
//! the real scheduler core through the deterministic simulated timer, so
//! each scenario replays the same interleaving bit for bit.

use core_types::TaskKind;
use scheduler_core::{SchedulerConfig, SchedulerRuntime, SystemSnapshot, TaskSnapshot};
use services_diagnostics::{DiagnosticBuffer, DiagnosticSink};
use sim_timer::SimTimerService;
use std::sync::Arc;
use timer_hal::TimerService;

/// Builds a runtime over a fresh simulated timer and a capturing sink
///
/// The runtime is returned in an `Arc` so probe callbacks scheduled on the
/// timer can snapshot it mid-run.
pub fn bootstrap(
    config: SchedulerConfig,
) -> (
    Arc<SchedulerRuntime>,
    Arc<SimTimerService>,
    Arc<DiagnosticBuffer>,
) {
    let timer = Arc::new(SimTimerService::new());
    let diagnostics = Arc::new(DiagnosticBuffer::new(256));
    let runtime = SchedulerRuntime::new(
        config,
        Arc::clone(&timer) as Arc<dyn TimerService>,
        Arc::clone(&diagnostics) as Arc<dyn DiagnosticSink>,
    )
    .expect("test config admitted");
    (Arc::new(runtime), timer, diagnostics)
}

/// Restricts a config to the given kinds; every other task is disabled
pub fn only_enabled(mut config: SchedulerConfig, kinds: &[TaskKind]) -> SchedulerConfig {
    for kind in TaskKind::ALL {
        if !kinds.contains(&kind) {
            config = config.with_enabled(kind, false);
        }
    }
    config
}

/// The snapshot entry for one task
pub fn task(snapshot: &SystemSnapshot, kind: TaskKind) -> &TaskSnapshot {
    &snapshot.tasks[kind.index()]
}
