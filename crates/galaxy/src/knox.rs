//! The Knox test for space-time interaction
//!
//! # Reference
//! Kulldorff, Martin, and Ulf Hjalmars. "The Knox method and other tests for
//! space-time interaction." Biometrics 55.2 (1999): 544-552.

use serde::Serialize;

use crate::Error;
use crate::cluster::ClusterResult;

/// the variance formula divides by `n(n-1)(n-2)(n-3)`
const MIN_SAMPLE_SIZE: f64 = 4.0;

/// The Knox statistics of a set of `n` events.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KnoxResult {
    /// number of distinct pairs of events, `n(n-1)/2`
    pub n_pairs: f64,
    /// expected number of pairs close in space and time if the two are
    /// independent
    pub expected: f64,
    /// variance of the number of pairs close in space and time
    pub variance: f64,
}

/// Performs the Knox test.
///
/// Let `n` be the number of events, so there are `N = n(n-1)/2` distinct
/// pairs. `ns` (`nt`) is the number of pairs close in space (time) and `x`
/// the number of pairs close in both. `n2s` is the number of pairs of
/// space-close pairs that have one event in common, and `n2t` is defined
/// equivalently for time.
///
/// ```text
/// N = n(n-1)/2
/// E = Nt*Ns/N
/// V = Ns*Nt/N + 4*N2s*N2t/(n(n-1)(n-2))
///     + 4*(Ns(Ns-1) - N2s)*(Nt(Nt-1) - N2t)/(n(n-1)(n-2)(n-3))
///     - (Ns*Nt/N)^2
/// ```
///
/// # Errors
/// Every input is a count, so it must be a finite, non-negative whole number,
/// and `n` must be at least 4.
/// The variance itself is not checked here: use [`KnoxResult::std_dev`] or
/// [`KnoxResult::z_score`], which reject a non-positive variance.
pub fn knox_test(
    ns: f64,
    n2s: f64,
    nt: f64,
    n2t: f64,
    x: f64,
    n: f64,
) -> Result<KnoxResult, Error> {
    for (name, value) in [
        ("ns", ns),
        ("n2s", n2s),
        ("nt", nt),
        ("n2t", n2t),
        ("x", x),
        ("n", n),
    ] {
        if !(value.is_finite() && value >= 0.0 && value.fract() == 0.0) {
            return Err(Error::non_finite_input(name, value));
        }
    }
    if n < MIN_SAMPLE_SIZE {
        return Err(Error::sample_size(n, MIN_SAMPLE_SIZE));
    }

    let n_pairs = n * (n - 1.0) / 2.0;
    let expected = nt * ns / n_pairs;

    let first_order = ns * nt / n_pairs;
    let variance = first_order + 4.0 * n2s * n2t / (n * (n - 1.0) * (n - 2.0))
        + 4.0 * (ns * (ns - 1.0) - n2s) * (nt * (nt - 1.0) - n2t)
            / (n * (n - 1.0) * (n - 2.0) * (n - 3.0))
        - first_order * first_order;

    Ok(KnoxResult {
        n_pairs,
        expected,
        variance,
    })
}

impl KnoxResult {
    /// Run the Knox test on the counts of a cluster calculation
    pub fn from_counts(counts: &ClusterResult) -> Result<KnoxResult, Error> {
        knox_test(
            counts.ns as f64,
            counts.n2s as f64,
            counts.nt as f64,
            counts.n2t as f64,
            counts.x as f64,
            counts.n_events as f64,
        )
    }

    /// The standard deviation, `sqrt(V)`.
    ///
    /// Fails when the variance isn't positive (which can happen through
    /// floating-point cancellation for small or degenerate inputs). The test
    /// is undefined in that case.
    pub fn std_dev(&self) -> Result<f64, Error> {
        if self.variance > 0.0 && self.variance.is_finite() {
            Ok(self.variance.sqrt())
        } else {
            Err(Error::degenerate_variance(self.variance))
        }
    }

    /// The Z-score of the observed number of pairs close in space and time,
    /// `|x - E| / sqrt(V)`
    pub fn z_score(&self, x: f64) -> Result<f64, Error> {
        Ok((x - self.expected).abs() / self.std_dev()?)
    }
}

/// Everything a report needs about one Knox test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KnoxSummary {
    #[serde(flatten)]
    pub result: KnoxResult,
    pub std_dev: f64,
    pub z_score: f64,
}

impl KnoxSummary {
    /// Run the Knox test on `counts` and derive the standard deviation and the
    /// Z-score of `counts.x`
    pub fn from_counts(counts: &ClusterResult) -> Result<KnoxSummary, Error> {
        let result = KnoxResult::from_counts(counts)?;
        Ok(KnoxSummary {
            result,
            std_dev: result.std_dev()?,
            z_score: result.z_score(counts.x as f64)?,
        })
    }
}
