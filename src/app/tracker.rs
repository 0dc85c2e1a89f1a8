// LogAnalyzer - app/tracker.rs
//
// Completion tracker: a countdown that many workers signal and one waiter
// blocks on. Signalling goes through an RAII guard so each registered unit
// of work signals exactly once, including when its thread unwinds.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Counts outstanding units of work for one engine run.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    pending: Mutex<usize>,
    all_done: Condvar,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one unit of work. The returned guard signals completion
    /// when dropped.
    ///
    /// Must be called before the unit is started, otherwise a concurrent
    /// `wait` may observe zero and return early.
    pub fn enter(&self) -> CompletionGuard<'_> {
        *self.lock() += 1;
        CompletionGuard { tracker: self }
    }

    /// Number of units registered and not yet finished.
    pub fn pending(&self) -> usize {
        *self.lock()
    }

    /// Block until every registered unit has signalled completion.
    pub fn wait(&self) {
        let mut pending = self.lock();
        while *pending > 0 {
            pending = self
                .all_done
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn done(&self) {
        let mut pending = self.lock();
        // A guard only exists after a matching increment.
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.all_done.notify_all();
        }
    }

    // The counter stays consistent across a panic (no code between lock and
    // unlock can panic), so a poisoned lock is recovered, not propagated.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outstanding registration with a `CompletionTracker`.
#[must_use = "dropping the guard immediately signals completion"]
#[derive(Debug)]
pub struct CompletionGuard<'a> {
    tracker: &'a CompletionTracker,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.tracker.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_wait_with_nothing_registered_returns() {
        let tracker = CompletionTracker::new();
        tracker.wait();
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_guard_drop_decrements() {
        let tracker = CompletionTracker::new();
        let a = tracker.enter();
        let b = tracker.enter();
        assert_eq!(tracker.pending(), 2);
        drop(a);
        assert_eq!(tracker.pending(), 1);
        drop(b);
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_wait_blocks_until_all_workers_finish() {
        let tracker = CompletionTracker::new();
        let finished = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for i in 0..16 {
                let guard = tracker.enter();
                let finished = &finished;
                s.spawn(move || {
                    let _guard = guard;
                    std::thread::sleep(Duration::from_millis(i % 4 * 5));
                    finished.fetch_add(1, Ordering::SeqCst);
                });
            }

            tracker.wait();
            assert_eq!(finished.load(Ordering::SeqCst), 16);
        });
    }

    #[test]
    fn test_panicking_worker_still_signals() {
        let tracker = CompletionTracker::new();

        std::thread::scope(|s| {
            let guard = tracker.enter();
            let handle = s.spawn(move || {
                let _guard = guard;
                panic!("worker failed");
            });
            tracker.wait();
            assert!(handle.join().is_err());
        });

        assert_eq!(tracker.pending(), 0);
    }
}
