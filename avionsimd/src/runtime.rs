//! Daemon runtime: configuration, main loop, and publishing

use crate::host_timer::HostTimerService;
use core_types::{TaskKind, TaskParams};
use scheduler_core::{SchedulerConfig, SchedulerError, SchedulerRuntime};
use services_diagnostics::{DiagEvent, DiagnosticSink, StderrSink};
use services_status_report::render;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use timer_hal::{Duration, TimerService};

/// Daemon error types
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Scheduler configuration rejected at admission
    #[error("scheduler configuration rejected: {0}")]
    Config(#[from] SchedulerError),

    /// A file the daemon must produce could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The execution log could not be serialized
    #[error("failed to serialize execution log: {0}")]
    Export(#[from] serde_json::Error),
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Total runtime; `None` runs until the process is killed
    pub runtime: Option<Duration>,
    /// Dispatch poll cadence
    pub dispatch_interval: Duration,
    /// Per-task parameter overrides
    pub overrides: Vec<(TaskKind, TaskParams)>,
    /// Tasks excluded from scheduling
    pub disabled: Vec<TaskKind>,
    /// Publish the status report here, atomically, every status interval
    pub status_file: Option<PathBuf>,
    /// How often to publish and poll for completion
    pub status_interval: Duration,
    /// Write the full execution log here as JSON at exit
    pub export_log: Option<PathBuf>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            runtime: Some(Duration::from_secs(10)),
            dispatch_interval: Duration::from_millis(10),
            overrides: Vec::new(),
            disabled: Vec::new(),
            status_file: None,
            status_interval: Duration::from_millis(500),
            export_log: None,
        }
    }
}

impl DaemonConfig {
    fn scheduler_config(&self) -> SchedulerConfig {
        let mut config =
            SchedulerConfig::default().with_dispatch_interval(self.dispatch_interval);
        for (kind, params) in &self.overrides {
            config = config.with_params(*kind, *params);
        }
        for kind in &self.disabled {
            config = config.with_enabled(*kind, false);
        }
        if let Some(limit) = self.runtime {
            config = config.with_run_limit(limit);
        }
        config
    }
}

/// Runs the scheduler against wall-clock time until it finishes
///
/// Prints the final status report to stdout. With no runtime limit this
/// only returns if the process is killed.
pub fn run(config: DaemonConfig) -> Result<(), DaemonError> {
    let timer = Arc::new(HostTimerService::new());
    let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(StderrSink);

    let runtime = SchedulerRuntime::new(
        config.scheduler_config(),
        Arc::clone(&timer) as Arc<dyn TimerService>,
        Arc::clone(&diagnostics),
    )?;
    runtime.start();

    loop {
        if let Some(path) = &config.status_file {
            // Publish failures degrade to a warning; the scheduler keeps
            // running without its observer surface.
            if let Err(error) = publish_status(path, &render(&runtime.snapshot())) {
                diagnostics.record(
                    DiagEvent::warn("status publish failed")
                        .with_field("path", path.display().to_string())
                        .with_field("error", error.to_string()),
                );
            }
        }
        if runtime.is_finished() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_nanos(
            config.status_interval.as_nanos(),
        ));
    }

    let report = render(&runtime.snapshot());
    if let Some(path) = &config.status_file {
        publish_status(path, &report).map_err(|source| DaemonError::Write {
            path: path.clone(),
            source,
        })?;
    }
    print!("{}", report);

    if let Some(path) = &config.export_log {
        let json = serde_json::to_string_pretty(&runtime.export_log())?;
        fs::write(path, json).map_err(|source| DaemonError::Write {
            path: path.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Writes the report via a sibling temp file and rename
///
/// Observers polling the file never read a torn report.
fn publish_status(path: &Path, report: &str) -> std::io::Result<()> {
    let staging = path.with_extension("tmp");
    fs::write(&staging, report)?;
    fs::rename(&staging, path)
}
