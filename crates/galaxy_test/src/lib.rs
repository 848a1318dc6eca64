use galaxy::{ClusterResult, Event, EventSet, Events, spatial_distance, temporal_distance};
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

/// Draws `n_events` events with integer coordinates in `[0, extent]` and
/// integer timestamps in `[0, time_span]`.
///
/// The coarse integer grid makes distances regularly
/// land exactly on a threshold (e.g. a 3-4-5 triangle).
pub fn random_events(seed: u64, n_events: usize, extent: i64, time_span: i64) -> Events {
    let mut my_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let coord_dist = Uniform::try_from(0..=extent).unwrap();
    let time_dist = Uniform::try_from(0..=time_span).unwrap();
    (0..n_events)
        .map(|_| {
            let x = coord_dist.sample(&mut my_rng) as f64;
            let y = coord_dist.sample(&mut my_rng) as f64;
            Event::new(x, y, time_dist.sample(&mut my_rng))
        })
        .collect()
}

/// Computes the counts that `galaxy::cluster` should produce, without the
/// triple loop.
///
/// Every pivot-sharing pair of pairs is determined by a pivot `j` and two
/// distinct neighbors of `j`, so the second-order counts follow from the
/// number of neighbors (the degree) of each event: `sum_j deg_j (deg_j - 1)
/// / 2`.
pub fn reference_counts(events: EventSet, d_max: f64, t_max: i64) -> ClusterResult {
    let n_events = events.len();
    let mut deg_s = vec![0_u64; n_events];
    let mut deg_t = vec![0_u64; n_events];
    let mut x = 0;
    let t_max = u64::try_from(t_max).ok();

    for i in 0..n_events {
        for j in (i + 1)..n_events {
            let (a, b) = (events.get(i), events.get(j));
            let s_match = spatial_distance(&a, &b) <= d_max;
            let t_match = t_max.is_some_and(|t_max| temporal_distance(&a, &b) <= t_max);
            if s_match {
                deg_s[i] += 1;
                deg_s[j] += 1;
            }
            if t_match {
                deg_t[i] += 1;
                deg_t[j] += 1;
            }
            if s_match && t_match {
                x += 1;
            }
        }
    }

    let first_order = |deg: &[u64]| deg.iter().sum::<u64>() / 2;
    let second_order = |deg: &[u64]| {
        deg.iter()
            .map(|&d| d * d.saturating_sub(1) / 2)
            .sum::<u64>()
    };
    ClusterResult {
        ns: first_order(&deg_s),
        n2s: second_order(&deg_s),
        nt: first_order(&deg_t),
        n2t: second_order(&deg_t),
        x,
        n_events,
        n_visited: n_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_events_are_reproducible() {
        let a = random_events(42, 20, 100, 50);
        let b = random_events(42, 20, 100, 50);
        let a: Vec<Event> = a.view().iter().collect();
        let b: Vec<Event> = b.view().iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn reference_for_a_star() {
        // event 0 is close to the three others, which are far from each other
        let events: Events = [
            Event::new(0.0, 0.0, 0),
            Event::new(10.0, 0.0, 100),
            Event::new(-10.0, 0.0, 200),
            Event::new(0.0, 10.0, 300),
        ]
        .into_iter()
        .collect();
        let counts = reference_counts(events.view(), 10.0, 1000);
        assert_eq!(counts.ns, 3);
        // pivot 0 joins C(3, 2) pairs of pairs
        assert_eq!(counts.n2s, 3);
        assert_eq!(counts.nt, 6);
        // every event has degree 3: 4 * C(3, 2)
        assert_eq!(counts.n2t, 12);
        assert_eq!(counts.x, 3);
    }
}
