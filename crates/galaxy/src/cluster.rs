use std::num::NonZeroUsize;
use std::ops::Range;
use std::time::Instant;

use serde::Serialize;

use crate::cancel::CancelToken;
use crate::config::ClusterConfig;
use crate::event::EventSet;
use crate::executor::{CountSpec, DefaultExecutor, Executor};
use crate::kernel::PartialCount;
use crate::progress::Progress;

/// The five space-time match counts of an event set.
///
/// Every count refers to unordered pairs (or pivot-sharing pairs of pairs):
/// - `ns`: pairs close in space
/// - `n2s`: pairs of space-close pairs that share one event
/// - `nt`: pairs close in time
/// - `n2t`: pairs of time-close pairs that share one event
/// - `x`: pairs close in space and time
///
/// # Partial results
/// When the run was cancelled, [`ClusterResult::is_partial`] returns `true`
/// and the counts are a lower bound. The halving that corrects for double
/// counting is applied regardless, but partitions stop at different points,
/// so a pair may have been visited from only one direction. Partial counts
/// are therefore only approximately corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClusterResult {
    pub ns: u64,
    pub n2s: u64,
    pub nt: u64,
    pub n2t: u64,
    pub x: u64,
    /// the number of events in the set
    pub n_events: usize,
    /// how many events were fully processed as the outer index
    pub n_visited: usize,
}

impl ClusterResult {
    /// Combine partial counts and correct for double counting
    pub fn from_partials(
        partials: impl IntoIterator<Item = PartialCount>,
        n_events: usize,
    ) -> Self {
        let total: PartialCount = partials.into_iter().sum();
        ClusterResult {
            ns: total.ns / 2,
            n2s: total.n2s / 2,
            nt: total.nt / 2,
            n2t: total.n2t / 2,
            x: total.x / 2,
            n_events,
            n_visited: total.visited,
        }
    }

    /// `true` when cancellation stopped the run before every event was
    /// processed
    pub fn is_partial(&self) -> bool {
        self.n_visited < self.n_events
    }
}

/// Split `0..n_events` into at most `n_workers` contiguous ranges.
///
/// The ranges have the same length except for the last one, which absorbs
/// the remainder. No range is ever empty: when there are fewer events than
/// workers, we use one range per event.
pub fn partition(n_events: usize, n_workers: NonZeroUsize) -> Vec<Range<usize>> {
    let n_parts = n_workers.get().min(n_events);
    if n_parts == 0 {
        return Vec::new();
    }
    let part_size = n_events / n_parts;
    (0..n_parts)
        .map(|part| {
            let start = part * part_size;
            let stop = if part + 1 == n_parts {
                n_events
            } else {
                start + part_size
            };
            start..stop
        })
        .collect()
}

/// Count the space-time matches of `events` with the [`DefaultExecutor`].
///
/// See [`cluster_with`] for details.
pub fn cluster(
    events: EventSet,
    config: &ClusterConfig,
    cancel: &CancelToken,
    progress: &impl Progress,
) -> ClusterResult {
    cluster_with(
        &mut DefaultExecutor::default(),
        events,
        config,
        cancel,
        progress,
    )
}

/// Count the space-time matches of `events`.
///
/// The events are split into `config.n_workers()` contiguous partitions (see
/// [`partition`]) that `executor` counts, potentially at the same time. The
/// partial counts are summed and halved. For a run that isn't cancelled, the
/// result doesn't depend on the executor or on the number of workers.
///
/// Cancelling `cancel` is not an error: the call still returns, with the
/// counts accumulated up to that point (see [`ClusterResult`]).
pub fn cluster_with(
    executor: &mut impl Executor,
    events: EventSet,
    config: &ClusterConfig,
    cancel: &CancelToken,
    progress: &impl Progress,
) -> ClusterResult {
    let n_events = events.len();
    if n_events < 2 {
        // no pairs exist
        return ClusterResult {
            n_events,
            n_visited: n_events,
            ..Default::default()
        };
    }

    let partitions = partition(n_events, config.n_workers());
    tracing::info!(
        n_events,
        n_partitions = partitions.len(),
        d_max = config.d_max(),
        t_max = config.t_max(),
        "starting space-time cluster calculation"
    );
    tracing::debug!(?partitions, "partition layout");

    let spec = CountSpec {
        events,
        d_max: config.d_max(),
        t_max: config.t_max(),
    };
    let start = Instant::now();
    progress.start(n_events);
    let partials = executor.drive(spec, &partitions, cancel, progress);
    progress.finish();

    let result = ClusterResult::from_partials(partials, n_events);
    tracing::info!(
        elapsed = ?start.elapsed(),
        n_visited = result.n_visited,
        partial = result.is_partial(),
        "finished space-time cluster calculation"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, Events};
    use crate::executor::{SerialExecutor, ThreadExecutor};
    use crate::progress::NoProgress;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn partition_covers_everything() {
        assert_eq!(partition(10, workers(4)), vec![0..2, 2..4, 4..6, 6..10]);
        assert_eq!(partition(8, workers(4)), vec![0..2, 2..4, 4..6, 6..8]);
        assert_eq!(partition(3, workers(1)), vec![0..3]);
        assert_eq!(partition(3, workers(8)), vec![0..1, 1..2, 2..3]);
        assert!(partition(0, workers(4)).is_empty());
    }

    #[test]
    fn fewer_than_two_events() {
        let config = ClusterConfig::default();
        for n in 0..2 {
            let events: Events = std::iter::repeat_n(Event::new(0.0, 0.0, 0), n).collect();
            let result = cluster(events.view(), &config, &CancelToken::new(), &NoProgress);
            assert_eq!(result.ns + result.n2s + result.nt + result.n2t + result.x, 0);
            assert_eq!(result.n_events, n);
            assert!(!result.is_partial());
        }
    }

    #[test]
    fn executors_agree() {
        let events: Events = (0..23)
            .map(|i| Event::new((i * 7 % 13) as f64, (i % 5) as f64, i64::from(i * 3 % 11)))
            .collect();
        let config = ClusterConfig::new(4.0, 3).unwrap().with_workers(workers(3));
        let token = CancelToken::new();
        let serial = cluster_with(
            &mut SerialExecutor,
            events.view(),
            &config,
            &token,
            &NoProgress,
        );
        let threaded = cluster_with(
            &mut ThreadExecutor,
            events.view(),
            &config,
            &token,
            &NoProgress,
        );
        assert_eq!(serial, threaded);
        assert!(!serial.is_partial());
    }

    #[test]
    fn cancelled_up_front() {
        let events: Events = (0..10).map(|i| Event::new(0.0, 0.0, i)).collect();
        let token = CancelToken::new();
        token.cancel();
        let result = cluster(
            events.view(),
            &ClusterConfig::default(),
            &token,
            &NoProgress,
        );
        assert!(result.is_partial());
        assert_eq!(result.n_visited, 0);
        assert_eq!(result.x, 0);
    }
}
