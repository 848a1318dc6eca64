//! The partition-and-count kernel
//!
//! Every event in a partition is paired with every other event in the full
//! set, and every such pair is extended by every third event that shares the
//! second event (the "pivot"). This visits each unordered pair twice (once as
//! `(i, j)` and once as `(j, i)`), and likewise each pivot-sharing triple.
//! The caller is responsible for halving the totals.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Range};

use crate::cancel::CancelToken;
use crate::event::{Event, EventSet};
use crate::misc::{spatial_distance, temporal_distance};
use crate::progress::Progress;

/// The raw (not yet halved) match counts accumulated over some range of
/// outer indices.
///
/// Combining partial counts is plain elementwise addition, so partitions can
/// be summed in any order and grouping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartialCount {
    /// ordered pairs that are close in space
    pub ns: u64,
    /// ordered pivot-sharing triples whose two pairs are both close in space
    pub n2s: u64,
    /// ordered pairs that are close in time
    pub nt: u64,
    /// ordered pivot-sharing triples whose two pairs are both close in time
    pub n2t: u64,
    /// ordered pairs that are close in space and time
    pub x: u64,
    /// number of outer indices that were fully processed
    pub visited: usize,
}

impl AddAssign for PartialCount {
    fn add_assign(&mut self, other: Self) {
        self.ns += other.ns;
        self.n2s += other.n2s;
        self.nt += other.nt;
        self.n2t += other.n2t;
        self.x += other.x;
        self.visited += other.visited;
    }
}

impl Add for PartialCount {
    type Output = PartialCount;

    fn add(mut self, other: Self) -> PartialCount {
        self += other;
        self
    }
}

impl Sum for PartialCount {
    fn sum<I: Iterator<Item = PartialCount>>(iter: I) -> Self {
        iter.fold(PartialCount::default(), Add::add)
    }
}

/// Counts matches for every outer index `i` in `range`.
///
/// For each `i` in `range` and each `j != i` over the whole set:
/// - `ns`, `nt` & `x` are incremented when the pair is close in space, in
///   time and in both (respectively).
/// - for each `k` distinct from `i` and `j`, `n2s` is incremented when both
///   `(i, j)` and `(j, k)` are close in space, and `n2t` when both are close
///   in time. The `(i, j)` distances are reused for every `k`.
///
/// A negative `t_max` never matches.
///
/// `cancel` is polled before every outer iteration. Once it is set, the
/// counts accumulated so far are returned. `progress` is notified after every
/// completed outer iteration.
pub fn count_partition(
    events: EventSet,
    range: Range<usize>,
    d_max: f64,
    t_max: i64,
    cancel: &CancelToken,
    progress: &impl Progress,
) -> PartialCount {
    let n_events = events.len();
    let t_max = u64::try_from(t_max).ok();
    let close_in_time =
        |a: &Event, b: &Event| t_max.is_some_and(|t_max| temporal_distance(a, b) <= t_max);
    let mut out = PartialCount::default();

    for i in range.clone() {
        if cancel.is_cancelled() {
            tracing::warn!(
                i,
                iterations = i - range.start,
                imin = range.start,
                imax = range.end,
                "cancelled, sending partial results"
            );
            return out;
        }

        let event_i = events.get(i);
        for j in 0..n_events {
            if i == j {
                continue;
            }
            let event_j = events.get(j);
            let s_match = spatial_distance(&event_i, &event_j) <= d_max;
            let t_match = close_in_time(&event_i, &event_j);

            if s_match {
                out.ns += 1;
            }
            if t_match {
                out.nt += 1;
            }
            if s_match && t_match {
                out.x += 1;
            }
            if !(s_match || t_match) {
                // no (j, k) pair can contribute
                continue;
            }

            for k in 0..n_events {
                if k == i || k == j {
                    continue;
                }
                let event_k = events.get(k);
                if s_match && spatial_distance(&event_j, &event_k) <= d_max {
                    out.n2s += 1;
                }
                if t_match && close_in_time(&event_j, &event_k) {
                    out.n2t += 1;
                }
            }
        }
        out.visited += 1;
        progress.inc();
    }
    out
}
