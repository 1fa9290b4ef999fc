//! Clock/timer service trait
//!
//! The contract the scheduler core requires of its timing collaborator:
//! a monotonic clock, one-shot callbacks at a future relative time, and a
//! bounded busy-wait standing in for real task work.

use crate::time::{Duration, Instant};
use std::fmt;

/// One-shot callback armed on a [`TimerService`]
///
/// Callbacks are consumed on firing. A periodic timer is expressed by
/// re-arming a fresh callback from within the current one, which also
/// guarantees a timer is never reentrant with itself.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Opaque handle to a pending one-shot callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Creates a handle from a raw id (timer-service implementations only)
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

/// Monotonic clock plus one-shot timer scheduling
///
/// # Implementation Notes
///
/// - `now` must be monotonic and non-blocking
/// - Callbacks fire at or after the requested delay, never before
/// - Firing order for equal due times follows arming order
/// - `cancel` of an already-fired or unknown handle is a no-op returning
///   `false`
/// - `busy_wait` returns only once the full duration has elapsed on this
///   service's clock; it must not run the caller's own pending callbacks
///   reentrantly, but callbacks of *other* timers may fire during the wait
pub trait TimerService: Send + Sync {
    /// Returns the current monotonic time
    fn now(&self) -> Instant;

    /// Arms a one-shot callback `delay` from now
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancels a pending callback; returns true if it had not yet fired
    fn cancel(&self, handle: TimerHandle) -> bool;

    /// Blocks the caller for exactly `duration` on this service's clock
    fn busy_wait(&self, duration: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Minimal fixed-clock implementation to pin down object safety
    struct FrozenClock {
        armed: Mutex<Vec<TimerHandle>>,
    }

    impl TimerService for FrozenClock {
        fn now(&self) -> Instant {
            Instant::ZERO
        }

        fn schedule_once(&self, _delay: Duration, _callback: TimerCallback) -> TimerHandle {
            let mut armed = self.armed.lock().unwrap();
            let handle = TimerHandle::from_raw(armed.len() as u64);
            armed.push(handle);
            handle
        }

        fn cancel(&self, handle: TimerHandle) -> bool {
            let mut armed = self.armed.lock().unwrap();
            let before = armed.len();
            armed.retain(|h| *h != handle);
            armed.len() != before
        }

        fn busy_wait(&self, _duration: Duration) {}
    }

    #[test]
    fn test_trait_is_object_safe() {
        let service: Box<dyn TimerService> = Box::new(FrozenClock {
            armed: Mutex::new(Vec::new()),
        });
        let handle = service.schedule_once(Duration::from_millis(10), Box::new(|| {}));
        assert!(service.cancel(handle));
        assert!(!service.cancel(handle));
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(TimerHandle::from_raw(7).to_string(), "timer:7");
    }
}
