//! # Timer HAL
//!
//! Abstraction over the clock/timer collaborator the scheduler consumes.
//!
//! ## Philosophy
//!
//! **Time is a service, not a global variable.**
//!
//! The scheduler core never reads an ambient clock and never arms an ambient
//! timer. Everything time-related goes through the [`TimerService`] trait, so
//! the same core runs against wall-clock time in the host daemon and against
//! deterministic virtual time in tests.
//!
//! ## Design Principles
//!
//! 1. **Monotonic**: [`TimerService::now`] never goes backwards
//! 2. **At-or-after**: scheduled callbacks fire at or after the requested
//!    delay, never before
//! 3. **Non-reentrant timers**: a timer's next firing is armed only from
//!    within or after the current firing
//! 4. **Bounded waits**: [`TimerService::busy_wait`] is a deterministic
//!    delay, never a yield point

pub mod service;
pub mod time;

pub use service::{TimerCallback, TimerHandle, TimerService};
pub use time::{Duration, Instant};
