//! # Simulated Timer Service
//!
//! Deterministic virtual-time implementation of [`timer_hal::TimerService`].
//!
//! ## Philosophy
//!
//! **Determinism enables thorough testing.**
//!
//! Time only advances when a test (or the waiting execution engine) says so.
//! Pending callbacks fire in `(due time, arming order)` order, with `now`
//! pinned to each callback's due time while it runs, so every interleaving a
//! test observes is reproducible bit for bit.
//!
//! This is not a mock: it is a full implementation of the timer contract
//! that happens to run without threads or wall-clock time.
//!
//! ## Nested advancement
//!
//! `busy_wait` advances virtual time in place. Because it may be called from
//! inside a firing callback (the execution engine waits out its workload in
//! the middle of a dispatch poll), advancement is reentrant: a nested wait
//! fires other due timers and may leave `now` beyond the outer target, in
//! which case the outer advancement finishes without moving time backwards.

use std::sync::{Mutex, PoisonError};
use timer_hal::{Duration, Instant, TimerCallback, TimerHandle, TimerService};

struct Pending {
    handle: TimerHandle,
    due: Instant,
    seq: u64,
    callback: TimerCallback,
}

struct Inner {
    now: Instant,
    next_raw: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Inner {
    /// Index of the earliest pending entry due at or before `target`
    fn next_due_index(&self, target: Instant) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(index, _)| index)
    }
}

/// Virtual-time timer service with explicit advancement
pub struct SimTimerService {
    inner: Mutex<Inner>,
}

impl SimTimerService {
    /// Creates a simulated timer service starting at time zero
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                now: Instant::ZERO,
                next_raw: 0,
                next_seq: 0,
                pending: Vec::new(),
            }),
        }
    }

    /// Advances virtual time by `delta`, firing every callback that falls due
    ///
    /// Callbacks fire outside the internal lock, so they may arm new timers,
    /// cancel pending ones, or advance time further themselves. A callback
    /// armed during the advancement fires within the same call if its due
    /// time lands inside the window.
    pub fn advance(&self, delta: Duration) {
        let target = self.lock().now + delta;
        self.run_until(target);
    }

    /// Number of callbacks currently armed
    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run_until(&self, target: Instant) {
        loop {
            let fired = {
                let mut inner = self.lock();
                match inner.next_due_index(target) {
                    Some(index) => {
                        let entry = inner.pending.remove(index);
                        if entry.due > inner.now {
                            inner.now = entry.due;
                        }
                        Some(entry.callback)
                    }
                    None => {
                        if target > inner.now {
                            inner.now = target;
                        }
                        None
                    }
                }
            };

            match fired {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl Default for SimTimerService {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService for SimTimerService {
    fn now(&self) -> Instant {
        self.lock().now
    }

    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut inner = self.lock();
        let handle = TimerHandle::from_raw(inner.next_raw);
        inner.next_raw += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due = inner.now + delay;
        inner.pending.push(Pending {
            handle,
            due,
            seq,
            callback,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut inner = self.lock();
        let before = inner.pending.len();
        inner.pending.retain(|p| p.handle != handle);
        inner.pending.len() != before
    }

    fn busy_wait(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let target = self.lock().now + duration;
        self.run_until(target);
    }
}
