//! # Scheduler Core
//!
//! Fixed-priority, periodic task scheduling with deadline accounting.
//!
//! ## Philosophy
//!
//! - **Mechanism faithful to the model**: priority-based, non-preemptive,
//!   poll-driven dispatch. Once a task starts it runs to completion; no task
//!   interrupts another regardless of relative priority. This directly
//!   shapes which deadlines are missed under contention and is preserved
//!   deliberately.
//! - **One lock, short critical sections**: every task record, the execution
//!   log, and the finished flag live behind a single mutex. The simulated
//!   workload wait always happens with the lock released.
//! - **Degrade, never halt**: a lost dispatch race is silent, a deadline
//!   miss is a counted outcome plus a warning event, a full log drops new
//!   entries. Nothing in the running core is fatal.
//!
//! ## Structure
//!
//! - [`config`]: typed configuration with admission validation
//! - [`registry`]: the fixed arena of task records and candidate selection
//! - [`exec_log`]: bounded append-only execution trace
//! - [`runtime`]: timer wiring: release scheduling, the dispatch poll, the
//!   execution engine, and the run limit
//! - [`snapshot`]: consistent read-only views for external observers

pub mod config;
pub mod error;
pub mod exec_log;
pub mod registry;
pub mod runtime;
pub mod snapshot;

pub use config::{SchedulerConfig, DEFAULT_DISPATCH_INTERVAL, DEFAULT_LOG_CAPACITY};
pub use error::SchedulerError;
pub use exec_log::ExecutionLog;
pub use registry::{TaskRecord, TaskRegistry};
pub use runtime::SchedulerRuntime;
pub use snapshot::{SystemSnapshot, TaskSnapshot, LOG_WINDOW};
