use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use galaxy::Progress;

const BAR_WIDTH: usize = 40;

/// Draws a progress bar on stderr.
///
/// Workers report concurrently, so the bar is only redrawn by the worker
/// that moves it to a new percentage.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    total: AtomicUsize,
    done: AtomicUsize,
    percent: AtomicUsize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&self, done: usize, total: usize, percent: usize) {
        let filled = BAR_WIDTH * percent / 100;
        let mut stderr = std::io::stderr().lock();
        // progress output is best effort
        let _ = write!(
            stderr,
            "\r[{}{}] {done}/{total} ({percent}%)",
            "=".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
        );
        let _ = stderr.flush();
    }
}

/// the percentage of `total` that `done` represents, rounded down
fn percent_of(done: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        (done.min(total) * 100) / total
    }
}

impl Progress for ConsoleProgress {
    fn start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        self.percent.store(0, Ordering::Relaxed);
        self.draw(0, total, 0);
    }

    fn inc(&self) {
        let total = self.total.load(Ordering::Relaxed);
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let percent = percent_of(done, total);
        let previous = self.percent.fetch_max(percent, Ordering::Relaxed);
        if percent > previous {
            self.draw(done, total, percent);
        }
    }

    fn finish(&self) {
        let total = self.total.load(Ordering::Relaxed);
        let done = self.done.load(Ordering::Relaxed);
        self.draw(done, total, percent_of(done, total));
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages() {
        assert_eq!(percent_of(0, 200), 0);
        assert_eq!(percent_of(1, 200), 0);
        assert_eq!(percent_of(2, 200), 1);
        assert_eq!(percent_of(200, 200), 100);
        assert_eq!(percent_of(0, 0), 100);
    }

    #[test]
    fn counts_items() {
        let progress = ConsoleProgress::new();
        progress.start(3);
        progress.inc();
        progress.inc();
        assert_eq!(progress.done.load(Ordering::Relaxed), 2);
        assert_eq!(progress.percent.load(Ordering::Relaxed), 66);
        progress.finish();
    }
}
