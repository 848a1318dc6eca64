// The public error type is opaque: callers can display an `Error` and inspect
// it through a handful of predicates, while the individual failure
// descriptions live in private structs.
//
// Cancellation is not an error. A cancelled run still produces (partial)
// counts.

use thiserror::Error as ThisError;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug, ThisError)]
enum ErrorKind {
    /// A distance/time threshold is not finite or not positive
    #[error(transparent)]
    InvalidThreshold(InvalidThresholdError),
    /// An integer lies outside of the acceptable range of values
    #[error(transparent)]
    IntegerRange(IntegerRangeError),
    /// The positions and timestamps describing an event set disagree
    #[error(transparent)]
    EventShape(EventShapeError),
    /// Too few events for the Knox test to be defined
    #[error(transparent)]
    SampleSize(SampleSizeError),
    /// The variance came out non-positive, so no Z-score exists
    #[error(transparent)]
    DegenerateVariance(DegenerateVarianceError),
    /// A count handed to the Knox test was negative, fractional or not finite
    #[error(transparent)]
    NonFiniteInput(NonFiniteInputError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that a threshold is not finite or not
    /// positive
    pub(crate) fn invalid_threshold(name: &'static str, value: f64) -> Self {
        Error {
            kind: ErrorKind::InvalidThreshold(InvalidThresholdError { name, value }),
        }
    }

    /// produce an error indicating that an integer lies outside the acceptable
    /// range of values
    pub(crate) fn integer_range(
        description: &'static str,
        actual: i64,
        min_val: i64,
        max_val: i64,
    ) -> Self {
        Error {
            kind: ErrorKind::IntegerRange(IntegerRangeError {
                description,
                actual,
                min_val,
                max_val,
            }),
        }
    }

    pub(crate) fn event_shape(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::EventShape(EventShapeError(what)),
        }
    }

    /// produce an error indicating that the Knox test needs more events
    pub(crate) fn sample_size(actual: f64, min_val: f64) -> Self {
        Error {
            kind: ErrorKind::SampleSize(SampleSizeError { actual, min_val }),
        }
    }

    pub(crate) fn degenerate_variance(variance: f64) -> Self {
        Error {
            kind: ErrorKind::DegenerateVariance(DegenerateVarianceError { variance }),
        }
    }

    pub(crate) fn non_finite_input(name: &'static str, value: f64) -> Self {
        Error {
            kind: ErrorKind::NonFiniteInput(NonFiniteInputError { name, value }),
        }
    }

    /// `true` when the error describes invalid input that was rejected before
    /// any computation took place
    pub fn is_invalid_input(&self) -> bool {
        !self.is_test_undefined()
    }

    /// `true` when the Knox test is not applicable to otherwise valid counts
    /// (i.e. the variance is not positive)
    pub fn is_test_undefined(&self) -> bool {
        matches!(self.kind, ErrorKind::DegenerateVariance(_))
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

#[derive(Clone, Debug, ThisError)]
#[error("{name} must be finite and positive, got {value}")]
struct InvalidThresholdError {
    name: &'static str,
    value: f64,
}

#[derive(Clone, Debug, ThisError)]
#[error(
    "{description} has a value of {actual}. The value should be no less than \
     {min_val} and not exceed {max_val}"
)]
struct IntegerRangeError {
    description: &'static str,
    actual: i64,
    min_val: i64,
    max_val: i64,
}

#[derive(Clone, Debug, ThisError)]
#[error("{0}")]
struct EventShapeError(&'static str);

/// An error that occurs when the Knox test receives fewer than 4 events. The
/// last variance term divides by `n(n-1)(n-2)(n-3)`.
#[derive(Clone, Debug, ThisError)]
#[error("the Knox test requires at least {min_val} events, got {actual}")]
struct SampleSizeError {
    actual: f64,
    min_val: f64,
}

#[derive(Clone, Debug, ThisError)]
#[error("the Knox test is undefined for this input: variance is {variance}")]
struct DegenerateVarianceError {
    variance: f64,
}

#[derive(Clone, Debug, ThisError)]
#[error("{name} must be a finite, non-negative whole number, got {value}")]
struct NonFiniteInputError {
    name: &'static str,
    value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Error::degenerate_variance(-1.0).is_test_undefined());
        assert!(!Error::degenerate_variance(0.0).is_invalid_input());
        assert!(Error::sample_size(3.0, 4.0).is_invalid_input());
        assert!(Error::invalid_threshold("d_max", -1.0).is_invalid_input());
    }

    #[test]
    fn messages() {
        let err = Error::integer_range("n_workers", 0, 1, 64);
        assert_eq!(
            err.to_string(),
            "n_workers has a value of 0. The value should be no less than 1 and not exceed 64"
        );
        let err = Error::sample_size(3.0, 4.0);
        assert_eq!(
            err.to_string(),
            "the Knox test requires at least 4 events, got 3"
        );
    }
}
