//! Status Report Integration Tests
//!
//! Renders reports from live scheduler snapshots and validates the
//! byte-stability of post-finish reports.

use core_types::{TaskKind, TaskParams};
use scheduler_core::SchedulerConfig;
use services_status_report::render;
use tests_scheduling::{bootstrap, only_enabled};
use timer_hal::Duration;

/// Test: a finished run renders a stable, fully populated report
#[test]
fn test_finished_run_renders_stable_report() {
    let config = only_enabled(
        SchedulerConfig::default()
            .with_params(TaskKind::FlightAttitude, TaskParams::from_millis(100, 50, 30)),
        &[TaskKind::FlightAttitude],
    )
    .with_run_limit(Duration::from_millis(450));
    let (runtime, timer, _) = bootstrap(config);
    runtime.start();
    timer.advance(Duration::from_millis(1000));

    let report = render(&runtime.snapshot());
    assert!(report.contains("SchedulerStatus: STOPPED"));
    assert!(report.contains("SystemFinished: YES"));
    assert!(report.contains("ExecutionLogCount: 4"));
    assert!(report.contains("Task0_MetCount: 4"));
    assert!(report.contains("Task0_MissedCount: 0"));
    assert!(report.contains("Task0_TotalExecs: 4"));
    assert!(report.contains("Task0_LastDeadlineResult: MET"));
    assert_eq!(report.matches("\nEXEC:").count(), 4);

    // Byte-identical across repeated reads once finished.
    timer.advance(Duration::from_millis(3000));
    assert_eq!(render(&runtime.snapshot()), report);
}

/// Test: a live run reports RUNNING and the disabled tasks as DISABLED
#[test]
fn test_live_report_reflects_task_states() {
    let config = only_enabled(SchedulerConfig::default(), &[TaskKind::FlightAttitude]);
    let (runtime, timer, _) = bootstrap(config);
    runtime.start();
    timer.advance(Duration::from_millis(50));

    let report = render(&runtime.snapshot());
    assert!(report.contains("SchedulerStatus: RUNNING"));
    assert!(report.contains("SystemFinished: NO"));
    assert!(report.contains("SystemRuntimeSec: 0"));
    assert!(report.contains("Task0_Status: READY"));
    assert!(report.contains("Task1_Status: DISABLED"));
    assert!(report.contains("Task4_Enabled: NO"));
}
