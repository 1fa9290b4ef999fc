//! Wall-clock timer service
//!
//! One worker thread drains a due-ordered queue of one-shot callbacks.
//! Callbacks run on the worker thread, serialized in `(due, arm-order)`
//! order; a callback that busy-waits (the execution engine's workload)
//! delays later callbacks, which then fire late: within the at-or-after
//! contract, never early.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Instant as StdInstant;
use timer_hal::{Duration, Instant, TimerCallback, TimerHandle, TimerService};

struct Entry {
    handle: TimerHandle,
    due: StdInstant,
    seq: u64,
    callback: TimerCallback,
}

struct Queue {
    pending: Vec<Entry>,
    next_raw: u64,
    next_seq: u64,
    shutdown: bool,
}

struct Shared {
    origin: StdInstant,
    queue: Mutex<Queue>,
    wakeup: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_std(duration: Duration) -> std::time::Duration {
    std::time::Duration::from_nanos(duration.as_nanos())
}

/// Wall-clock implementation of [`TimerService`]
///
/// Dropping the service shuts the worker down; callbacks still pending at
/// that point never fire.
pub struct HostTimerService {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl HostTimerService {
    /// Starts the worker thread; `now` reads zero at this moment
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            origin: StdInstant::now(),
            queue: Mutex::new(Queue {
                pending: Vec::new(),
                next_raw: 0,
                next_seq: 0,
                shutdown: false,
            }),
            wakeup: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || worker_loop(&worker_shared));

        Self {
            shared,
            worker: Some(worker),
        }
    }
}

impl Default for HostTimerService {
    fn default() -> Self {
        Self::new()
    }
}

fn worker_loop(shared: &Shared) {
    let mut queue = shared.lock();
    loop {
        if queue.shutdown {
            return;
        }

        let now = StdInstant::now();
        let next = queue
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, entry)| (index, entry.due));

        match next {
            Some((index, due)) if due <= now => {
                let entry = queue.pending.remove(index);
                drop(queue);
                (entry.callback)();
                queue = shared.lock();
            }
            Some((_, due)) => {
                let (guard, _) = shared
                    .wakeup
                    .wait_timeout(queue, due - now)
                    .unwrap_or_else(PoisonError::into_inner);
                queue = guard;
            }
            None => {
                queue = shared
                    .wakeup
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
    }
}

impl TimerService for HostTimerService {
    fn now(&self) -> Instant {
        Instant::from_nanos(self.shared.origin.elapsed().as_nanos() as u64)
    }

    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let due = StdInstant::now() + to_std(delay);
        let mut queue = self.shared.lock();
        let handle = TimerHandle::from_raw(queue.next_raw);
        queue.next_raw += 1;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(Entry {
            handle,
            due,
            seq,
            callback,
        });
        drop(queue);
        self.shared.wakeup.notify_one();
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut queue = self.shared.lock();
        let before = queue.pending.len();
        queue.pending.retain(|entry| entry.handle != handle);
        queue.pending.len() != before
    }

    fn busy_wait(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let deadline = StdInstant::now() + to_std(duration);
        while StdInstant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

impl Drop for HostTimerService {
    fn drop(&mut self) {
        self.shared.lock().shutdown = true;
        self.shared.wakeup.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    #[test]
    fn test_now_is_monotonic() {
        let timer = HostTimerService::new();
        let first = timer.now();
        timer.busy_wait(Duration::from_millis(2));
        let second = timer.now();
        assert!(second > first);
    }

    #[test]
    fn test_callback_fires_at_or_after_delay() {
        let timer = HostTimerService::new();
        let fired_at = Arc::new(StdMutex::new(None));

        let start = StdInstant::now();
        let slot = Arc::clone(&fired_at);
        timer.schedule_once(
            Duration::from_millis(20),
            Box::new(move || {
                *slot.lock().unwrap() = Some(start.elapsed());
            }),
        );

        std::thread::sleep(std::time::Duration::from_millis(100));
        let elapsed = fired_at.lock().unwrap().expect("callback fired");
        assert!(elapsed >= std::time::Duration::from_millis(20));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let timer = HostTimerService::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&fired);
        let handle = timer.schedule_once(
            Duration::from_millis(30),
            Box::new(move || {
                f.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(timer.cancel(handle));
        std::thread::sleep(std::time::Duration::from_millis(80));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fires_in_due_order() {
        let timer = HostTimerService::new();
        let order = Arc::new(StdMutex::new(Vec::new()));

        for (label, delay_ms) in [("second", 30u64), ("first", 10)] {
            let o = Arc::clone(&order);
            timer.schedule_once(
                Duration::from_millis(delay_ms),
                Box::new(move || o.lock().unwrap().push(label)),
            );
        }

        std::thread::sleep(std::time::Duration::from_millis(100));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_busy_wait_blocks_for_full_duration() {
        let timer = HostTimerService::new();
        let start = StdInstant::now();
        timer.busy_wait(Duration::from_millis(15));
        assert!(start.elapsed() >= std::time::Duration::from_millis(15));
    }

    #[test]
    fn test_drop_discards_pending_callbacks() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let timer = HostTimerService::new();
            let f = Arc::clone(&fired);
            timer.schedule_once(
                Duration::from_millis(200),
                Box::new(move || {
                    f.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
