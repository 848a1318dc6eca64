//! Backends that drive the counting kernel over a set of partitions
//!
//! An executor receives a [`CountSpec`] (what to count) and a list of
//! contiguous index ranges (how the work is split up). It must hand back one
//! [`PartialCount`] per range. Since partial counts are combined by addition,
//! the order they come back in doesn't matter.

use std::ops::Range;
use std::sync::mpsc;
use std::thread;

use crate::cancel::CancelToken;
use crate::event::EventSet;
use crate::kernel::{PartialCount, count_partition};
use crate::progress::Progress;

/// Bundles the read-only inputs that every partition shares
#[derive(Clone, Copy)]
pub struct CountSpec<'a> {
    pub events: EventSet<'a>,
    pub d_max: f64,
    pub t_max: i64,
}

impl CountSpec<'_> {
    /// count the matches for the outer indices in `range`
    pub fn count(
        &self,
        range: Range<usize>,
        cancel: &CancelToken,
        progress: &impl Progress,
    ) -> PartialCount {
        count_partition(
            self.events,
            range,
            self.d_max,
            self.t_max,
            cancel,
            progress,
        )
    }
}

pub trait Executor {
    /// Count every partition in `partitions` and return the partial counts.
    ///
    /// Implementations must not return until every partition has either been
    /// fully counted or has observed `cancel`.
    fn drive(
        &mut self,
        spec: CountSpec,
        partitions: &[Range<usize>],
        cancel: &CancelToken,
        progress: &impl Progress,
    ) -> Vec<PartialCount>;
}

/// Runs every partition on its own scoped thread and gathers the partial
/// counts over a channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadExecutor;

impl Executor for ThreadExecutor {
    fn drive(
        &mut self,
        spec: CountSpec,
        partitions: &[Range<usize>],
        cancel: &CancelToken,
        progress: &impl Progress,
    ) -> Vec<PartialCount> {
        let (sender, receiver) = mpsc::channel();

        // the scope joins every worker before returning (and re-raises a
        // worker's panic)
        thread::scope(|scope| {
            for (worker, range) in partitions.iter().cloned().enumerate() {
                let sender = sender.clone();
                scope.spawn(move || {
                    let partial = spec.count(range.clone(), cancel, progress);
                    tracing::debug!(worker, ?range, visited = partial.visited, "worker done");
                    // the receiver lives until after the scope ends, so this
                    // can't fail
                    let _ = sender.send(partial);
                });
            }
        });
        drop(sender);

        receiver.into_iter().collect()
    }
}

/// Runs the partitions one after another on the calling thread.
///
/// Produces exactly the same counts as [`ThreadExecutor`]. Because partitions
/// run in order, a cancellation request only affects the partition being
/// counted and the ones after it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn drive(
        &mut self,
        spec: CountSpec,
        partitions: &[Range<usize>],
        cancel: &CancelToken,
        progress: &impl Progress,
    ) -> Vec<PartialCount> {
        partitions
            .iter()
            .cloned()
            .enumerate()
            .map(|(worker, range)| {
                let partial = spec.count(range.clone(), cancel, progress);
                tracing::debug!(worker, ?range, visited = partial.visited, "worker done");
                partial
            })
            .collect()
    }
}

/// The executor used by [`cluster`](crate::cluster).
///
/// Building with the `serial` feature swaps in [`SerialExecutor`].
#[cfg(not(feature = "serial"))]
pub type DefaultExecutor = ThreadExecutor;

/// The executor used by [`cluster`](crate::cluster).
///
/// Building without the `serial` feature swaps in [`ThreadExecutor`].
#[cfg(feature = "serial")]
pub type DefaultExecutor = SerialExecutor;
