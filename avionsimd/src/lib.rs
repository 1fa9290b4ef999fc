//! # AvionSim Host Daemon
//!
//! Runs the scheduler core against wall-clock time.
//!
//! ## Philosophy
//!
//! - **The daemon owns I/O**: the scheduler core never prints, never touches
//!   the filesystem
//! - **Output is snapshot rendering**: the status file and the final report
//!   are rendered snapshots, never incremental terminal state
//! - **Same core as the tests**: only the timer service differs between a
//!   daemon run and a deterministic simulation run
//!
//! ## Responsibilities
//!
//! - Provide the wall-clock [`host_timer::HostTimerService`]
//! - Translate command-line overrides into a `SchedulerConfig`
//! - Publish the status report to a file for external observers
//! - Export the execution log as JSON at exit

pub mod host_timer;
pub mod runtime;

pub use host_timer::HostTimerService;
pub use runtime::{run, DaemonConfig, DaemonError};
