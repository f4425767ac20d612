//! Inclusive sample-index intervals.

use std::fmt;

use crate::error::ModelError;

/// A closed-closed range of sample indices `[first, last]`.
///
/// Marks a "selected" region of an observation. The exporter works with
/// half-open ranges, available through [`start`](Self::start) and
/// [`stop`](Self::stop).
///
/// # Examples
///
/// ```
/// use tod_core::SampleInterval;
///
/// let iv = SampleInterval::new(2, 5).unwrap();
/// assert_eq!(iv.start(), 2);
/// assert_eq!(iv.stop(), 6);
/// assert_eq!(iv.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleInterval {
    /// First sample in the interval.
    pub first: usize,
    /// Last sample in the interval (inclusive).
    pub last: usize,
}

impl SampleInterval {
    /// Create an interval, rejecting `last < first` and a `last` with no
    /// half-open stop (`usize::MAX`).
    pub fn new(first: usize, last: usize) -> Result<Self, ModelError> {
        if last < first || last == usize::MAX {
            return Err(ModelError::InvalidInterval { first, last });
        }
        Ok(Self { first, last })
    }

    /// Half-open start (equal to `first`).
    pub fn start(&self) -> usize {
        self.first
    }

    /// Half-open stop (`last + 1`).
    ///
    /// Saturates at `usize::MAX` for a hand-built interval ending there.
    pub fn stop(&self) -> usize {
        self.last.saturating_add(1)
    }

    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.stop() - self.start()
    }

    /// Always false: an interval covers at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for SampleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
