//! # Core Types
//!
//! This crate defines the fundamental types shared across AvionSim.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: Periods, deadlines, and workloads are typed
//!   durations, never bare integers.
//! - **Fixed task universe**: The set of critical functions is known at
//!   compile time; [`TaskKind`] is the single source of task identity.
//! - **Type safety first**: Deadline outcomes and task statuses are enums,
//!   not strings or sentinel integers.
//!
//! ## Key Types
//!
//! - [`TaskKind`]: Stable type tag for each critical avionics function
//! - [`TaskParams`]: Live-retunable period/deadline/workload configuration
//! - [`TaskSpec`]: Fixed identity plus initial configuration for one task
//! - [`TaskStats`]: Monotonic deadline-compliance counters
//! - [`ExecRecord`]: One completed execution, for timeline reconstruction
//! - [`RunId`]: Unique identifier for one scheduler run

pub mod ids;
pub mod record;
pub mod task;

pub use ids::RunId;
pub use record::ExecRecord;
pub use task::{
    default_specs, DeadlineOutcome, TaskKind, TaskParams, TaskSpec, TaskStats, TaskStatus,
};
