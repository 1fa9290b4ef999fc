//! # Status Report Service
//!
//! Renders a [`SystemSnapshot`] as the line-oriented `key: value` status
//! text external observers poll. Rendering is read-only and pure: state in,
//! text out. The snapshot itself is captured under the scheduler lock, so a
//! rendered report is always internally consistent.
//!
//! Absence of a backing snapshot (the status source is not mounted, or the
//! published file cannot be read) is a distinct, rendered condition (a
//! placeholder report), never a crash.

use scheduler_core::{SystemSnapshot, TaskSnapshot};
use std::fmt::Write as _;
use std::path::Path;

/// First line of every report
pub const REPORT_BANNER: &str = "AvionicsSystem: Multi-Task Simulator";

/// Renders the full status report for a snapshot
pub fn render(snapshot: &SystemSnapshot) -> String {
    let mut out = String::new();

    let scheduler_status = if snapshot.scheduler_running {
        "RUNNING"
    } else {
        "STOPPED"
    };
    let runtime_secs = snapshot.run_limit.map_or(0, |limit| limit.as_secs());

    let _ = writeln!(out, "{}", REPORT_BANNER);
    let _ = writeln!(out, "RunId: {}", snapshot.run_id);
    let _ = writeln!(out, "SchedulerStatus: {}", scheduler_status);
    let _ = writeln!(
        out,
        "SystemFinished: {}",
        if snapshot.finished { "YES" } else { "NO" }
    );
    let _ = writeln!(out, "ExecutionLogCount: {}", snapshot.log_len);
    let _ = writeln!(out, "SystemRuntimeSec: {}", runtime_secs);
    let _ = writeln!(out, "ActiveTasks: {}", snapshot.active_tasks());
    let _ = writeln!(out, "---");

    for (index, task) in snapshot.tasks.iter().enumerate() {
        render_task(&mut out, index, task);
        if index < snapshot.tasks.len() - 1 {
            let _ = writeln!(out, "---");
        }
    }

    if !snapshot.log_window.is_empty() {
        let _ = writeln!(out, "---");
        let _ = writeln!(out, "EXECUTION_LOG:");
        for record in &snapshot.log_window {
            let _ = writeln!(out, "{}", record.to_report_line());
        }
    }

    out
}

fn render_task(out: &mut String, index: usize, task: &TaskSnapshot) {
    let last_exec_ms = task
        .last_exec_duration
        .map_or(0, |duration| duration.as_millis());
    let last_result = task.last_outcome.map_or("N/A", |outcome| outcome.as_str());

    let _ = writeln!(out, "Task{}_Name: {}", index, task.name);
    let _ = writeln!(out, "Task{}_Priority: {}", index, task.priority);
    let _ = writeln!(out, "Task{}_Period: {}", index, task.params.period.as_millis());
    let _ = writeln!(
        out,
        "Task{}_Deadline: {}",
        index,
        task.params.deadline.as_millis()
    );
    let _ = writeln!(
        out,
        "Task{}_Workload: {}",
        index,
        task.params.workload.as_millis()
    );
    let _ = writeln!(out, "Task{}_Status: {}", index, task.status.as_str());
    let _ = writeln!(out, "Task{}_LastExecTime: {}", index, last_exec_ms);
    let _ = writeln!(out, "Task{}_LastDeadlineResult: {}", index, last_result);
    let _ = writeln!(out, "Task{}_MetCount: {}", index, task.stats.met_count);
    let _ = writeln!(out, "Task{}_MissedCount: {}", index, task.stats.missed_count);
    let _ = writeln!(
        out,
        "Task{}_TotalExecs: {}",
        index,
        task.stats.total_executions
    );
    let _ = writeln!(
        out,
        "Task{}_Enabled: {}",
        index,
        if task.enabled { "YES" } else { "NO" }
    );
}

/// Placeholder report for an absent backing snapshot
pub fn render_unavailable() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_BANNER);
    let _ = writeln!(out, "SchedulerStatus: UNAVAILABLE");
    let _ = writeln!(out, "ActiveTasks: 0");
    out
}

/// Reads a published status file, degrading to the placeholder report
///
/// The file is the daemon's equivalent of the original `/proc` mount; a
/// missing or unreadable file means the collaborator is not mounted.
pub fn read_status_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|_| render_unavailable())
}
