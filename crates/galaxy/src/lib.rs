/*!
Computes the Knox test for space-time interaction between geolocated,
timestamped events.

# High-Level: the Knox test

Given `n` events, the Knox test asks whether pairs of events that are close
together in space are also disproportionately close together in time (a
signature of clustering, e.g. during a disease outbreak). Two thresholds
define "close": a maximum distance `d_max` and a maximum time difference
`t_max`.

The test needs 5 counts over all distinct pairs of events:
- `ns`/`nt`: pairs close in space/time,
- `x`: pairs close in both,
- `n2s`/`n2t`: pairs of space-close/time-close pairs that share an event
  (these enter the variance).

Computing them takes `O(n^3)` distance evaluations. [`cluster`] splits the
work into contiguous partitions of events, counts the partitions in
parallel, and can be cancelled cooperatively (returning partial counts).
[`knox_test`] then turns the counts into the expected number of
space-and-time-close pairs and its variance (Kulldorff & Hjalmars, 1999).

# Example

```
use galaxy::{CancelToken, ClusterConfig, Event, Events, KnoxSummary, NoProgress, cluster};

const HOUR: i64 = 3_600_000_000_000;
let events: Events = (0..6)
    .map(|i| Event::new(100.0 * i as f64, 0.0, 24 * HOUR * i))
    .collect();
// neighbors are 100 m and 1 day apart
let config = ClusterConfig::from_days(150.0, 2).unwrap();
let counts = cluster(events.view(), &config, &CancelToken::new(), &NoProgress);
assert_eq!(counts.ns, 5);
assert_eq!(counts.nt, 9);
assert_eq!(counts.x, 5);

match KnoxSummary::from_counts(&counts) {
    Ok(summary) => println!("Z = {}", summary.z_score),
    Err(err) => println!("test not applicable: {err}"),
}
```
*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the modules in this package
mod cancel;
mod cluster;
mod config;
mod error;
mod event;
mod executor;
mod kernel;
mod knox;
mod misc;
mod progress;

// pull in the symbols that are visible outside of the package
pub use cancel::CancelToken;
pub use cluster::{ClusterResult, cluster, cluster_with, partition};
pub use config::{ClusterConfig, NANOS_PER_DAY, days_to_nanos};
pub use error::Error;
pub use event::{Event, EventSet, Events, Point};
pub use executor::{CountSpec, DefaultExecutor, Executor, SerialExecutor, ThreadExecutor};
pub use kernel::{PartialCount, count_partition};
pub use knox::{KnoxResult, KnoxSummary, knox_test};
pub use misc::{spatial_distance, temporal_distance};
pub use progress::{NoProgress, Progress};
