//! Error types for the TOD data model.

use std::error::Error;
use std::fmt;

/// Errors raised while building or interpreting observations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// An observation name is not of the form `"<source>-<id>"` with a
    /// numeric trailing segment.
    InvalidObservationName {
        /// The offending name.
        name: String,
        /// Why it failed to parse.
        reason: String,
    },
    /// An inclusive interval whose `last` precedes its `first`, or whose
    /// `last` is `usize::MAX`.
    InvalidInterval {
        /// First sample of the interval.
        first: usize,
        /// Last sample of the interval (inclusive).
        last: usize,
    },
    /// Local sample bounds that are not ascending.
    InvalidLocalSamples {
        /// First locally available sample.
        first: usize,
        /// Last locally available sample.
        last: usize,
    },
    /// A per-sample series does not reach the required sample index.
    SeriesTooShort {
        /// Name of the series.
        series: String,
        /// Number of samples present.
        len: usize,
        /// Number of samples required.
        required: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObservationName { name, reason } => {
                write!(f, "invalid observation name '{name}': {reason}")
            }
            Self::InvalidInterval { first, last } => {
                write!(f, "invalid interval [{first}, {last}]")
            }
            Self::InvalidLocalSamples { first, last } => {
                write!(f, "local sample bounds ({first}, {last}) are not ascending")
            }
            Self::SeriesTooShort {
                series,
                len,
                required,
            } => write!(
                f,
                "series '{series}' has {len} samples, {required} required"
            ),
        }
    }
}

impl Error for ModelError {}
