//! Scheduler error types

use core_types::TaskKind;
use thiserror::Error;

/// Errors raised by configuration admission checks
///
/// These are the only fallible surface of the core: once a configuration is
/// admitted, nothing in the running scheduler returns an error. Benign
/// dispatch races are silent by design and deadline misses are tracked
/// outcomes, not faults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// A task was configured with a zero period
    #[error("task '{0}' has a zero period")]
    ZeroPeriod(TaskKind),

    /// The dispatch poll interval was configured as zero
    #[error("dispatch interval must be non-zero")]
    ZeroDispatchInterval,

    /// Two tasks share a priority rank
    #[error("priority {0} is assigned to more than one task")]
    DuplicatePriority(u32),

    /// A task spec is not stored at its own registry index
    #[error("spec for '{0}' is not at its registry index")]
    MisplacedSpec(TaskKind),
}
