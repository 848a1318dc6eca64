/// Receives "n items processed out of total" notifications.
///
/// One item is one outer iteration of the counting kernel (i.e. one event
/// whose pairs and triples have all been visited). Implementations are shared
/// by every worker, so they must tolerate concurrent calls.
pub trait Progress: Sync {
    /// Called once before any work is dispatched
    fn start(&self, total: usize) {
        let _ = total;
    }

    /// Called by a worker each time it finishes an item
    fn inc(&self);

    /// Called once after every worker has reported
    fn finish(&self) {}
}

/// A [`Progress`] that ignores every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline(always)]
    fn inc(&self) {}
}
