use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::Error;

/// nanoseconds per day
pub const NANOS_PER_DAY: i64 = 86_400_000_000_000;

const DEFAULT_D_MAX: f64 = 1800.0;
const DEFAULT_T_MAX_DAYS: i64 = 16;
const DEFAULT_N_WORKERS: usize = 4;

/// Converts a number of days to nanoseconds, failing on overflow
pub fn days_to_nanos(days: i64) -> Result<i64, Error> {
    days.checked_mul(NANOS_PER_DAY).ok_or_else(|| {
        Error::integer_range(
            "days",
            days,
            i64::MIN / NANOS_PER_DAY,
            i64::MAX / NANOS_PER_DAY,
        )
    })
}

/// Parameters of a [`cluster`](crate::cluster) run.
///
/// Two events are "close in space" when their distance is no more than
/// `d_max`, and "close in time" when their timestamps differ by no more than
/// `t_max` nanoseconds. Both bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClusterConfig")]
pub struct ClusterConfig {
    d_max: f64,
    t_max: i64,
    n_workers: NonZeroUsize,
}

impl ClusterConfig {
    /// create a new instance using the default worker count
    pub fn new(d_max: f64, t_max: i64) -> Result<Self, Error> {
        if !(d_max.is_finite() && d_max > 0.0) {
            Err(Error::invalid_threshold("d_max", d_max))
        } else if t_max <= 0 {
            Err(Error::integer_range("t_max", t_max, 1, i64::MAX))
        } else {
            Ok(ClusterConfig {
                d_max,
                t_max,
                n_workers: default_workers(),
            })
        }
    }

    /// Like [`ClusterConfig::new`], but `t_max` is given in whole days
    pub fn from_days(d_max: f64, t_max_days: i64) -> Result<Self, Error> {
        Self::new(d_max, days_to_nanos(t_max_days)?)
    }

    pub fn with_workers(self, n_workers: NonZeroUsize) -> Self {
        ClusterConfig { n_workers, ..self }
    }

    pub fn d_max(&self) -> f64 {
        self.d_max
    }

    pub fn t_max(&self) -> i64 {
        self.t_max
    }

    pub fn n_workers(&self) -> NonZeroUsize {
        self.n_workers
    }
}

impl Default for ClusterConfig {
    /// 1800 meters, 16 days and 4 workers
    fn default() -> Self {
        ClusterConfig {
            d_max: DEFAULT_D_MAX,
            t_max: DEFAULT_T_MAX_DAYS * NANOS_PER_DAY,
            n_workers: default_workers(),
        }
    }
}

fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_N_WORKERS).unwrap_or(NonZeroUsize::MIN)
}

// deserialization goes through the same validation as `ClusterConfig::new`
#[derive(Deserialize)]
struct RawClusterConfig {
    d_max: f64,
    t_max: i64,
    n_workers: NonZeroUsize,
}

impl TryFrom<RawClusterConfig> for ClusterConfig {
    type Error = Error;

    fn try_from(raw: RawClusterConfig) -> Result<Self, Error> {
        Ok(ClusterConfig::new(raw.d_max, raw.t_max)?.with_workers(raw.n_workers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_thresholds() {
        assert!(ClusterConfig::new(0.0, 1).is_err());
        assert!(ClusterConfig::new(-5.0, 1).is_err());
        assert!(ClusterConfig::new(f64::NAN, 1).is_err());
        assert!(ClusterConfig::new(f64::INFINITY, 1).is_err());
        assert!(ClusterConfig::new(1.0, 0).is_err());
        assert!(ClusterConfig::new(1.0, -1).is_err());
        assert!(ClusterConfig::from_days(1.0, i64::MAX / 2).is_err());
    }

    #[test]
    fn defaults() {
        let config = ClusterConfig::default();
        assert_eq!(config.d_max(), 1800.0);
        assert_eq!(config.t_max(), 16 * NANOS_PER_DAY);
        assert_eq!(config.n_workers().get(), 4);
        assert_eq!(ClusterConfig::from_days(1800.0, 16).unwrap(), config);
    }

    #[test]
    fn with_workers() {
        let config = ClusterConfig::new(10.0, 10)
            .unwrap()
            .with_workers(NonZeroUsize::new(7).unwrap());
        assert_eq!(config.n_workers().get(), 7);
        assert_eq!(config.d_max(), 10.0);
    }
}
