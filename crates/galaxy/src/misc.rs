//! Distance primitives shared by the counting kernel

use crate::event::Event;

/// Euclidean distance between the locations of `a` and `b`
#[inline(always)]
pub fn spatial_distance(a: &Event, b: &Event) -> f64 {
    let xdiff = a.s.x - b.s.x;
    let ydiff = a.s.y - b.s.y;
    (xdiff * xdiff + ydiff * ydiff).sqrt()
}

/// Absolute difference between the timestamps of `a` and `b`
///
/// The difference of two `i64` timestamps doesn't always fit in an `i64`
/// (e.g. events more than ~292 years apart), but it always fits in a `u64`.
#[inline(always)]
pub fn temporal_distance(a: &Event, b: &Event) -> u64 {
    a.t.abs_diff(b.t)
}
