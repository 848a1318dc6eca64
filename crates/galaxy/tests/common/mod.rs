// not every test file uses every helper
#![allow(dead_code)]

// the reason this is named mod.rs has to do with how cargo discovers
// integration tests (files directly inside tests/ are compiled as separate
// crates)

use std::sync::atomic::{AtomicUsize, Ordering};

use galaxy::{CancelToken, Event, Events, Progress};

pub const HOUR: i64 = 3_600_000_000_000;
pub const DAY: i64 = 24 * HOUR;

/// The 3 events from the worked example: the first two are 100 m and 1 hour
/// apart, the third is kilometers and months away from both.
pub fn worked_example() -> Events {
    [
        Event::new(0.0, 0.0, 0),
        Event::new(100.0, 0.0, HOUR),
        Event::new(5000.0, 0.0, 100 * DAY),
    ]
    .into_iter()
    .collect()
}

/// A [`Progress`] that cancels `token` once `after` items have been
/// processed.
pub struct CancelAfter {
    token: CancelToken,
    after: usize,
    seen: AtomicUsize,
}

impl CancelAfter {
    pub fn new(token: CancelToken, after: usize) -> Self {
        CancelAfter {
            token,
            after,
            seen: AtomicUsize::new(0),
        }
    }
}

impl Progress for CancelAfter {
    fn inc(&self) {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 == self.after {
            self.token.cancel();
        }
    }
}

/// Counts notifications, to check what the kernel reports
#[derive(Default)]
pub struct CountingProgress {
    pub total: AtomicUsize,
    pub seen: AtomicUsize,
    pub finished: AtomicUsize,
}

impl Progress for CountingProgress {
    fn start(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
    }

    fn inc(&self) {
        self.seen.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}
