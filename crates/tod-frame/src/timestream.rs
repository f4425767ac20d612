//! Time-stamped sample series and detector maps.

use std::fmt;

use indexmap::IndexMap;

use crate::time::Time;
use crate::units::SECOND;

/// Physical unit kind of a timestream's samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimestreamUnits {
    /// Dimensionless or unspecified.
    #[default]
    None,
    /// Raw ADC counts.
    Counts,
    /// Current.
    Current,
    /// Power.
    Power,
    /// Resistance.
    Resistance,
    /// CMB thermodynamic temperature (K_cmb).
    Tcmb,
    /// Angle.
    Angle,
}

impl TimestreamUnits {
    /// Wire tag for this unit kind.
    pub fn tag(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Counts => 1,
            Self::Current => 2,
            Self::Power => 3,
            Self::Resistance => 4,
            Self::Tcmb => 5,
            Self::Angle => 6,
        }
    }

    /// Unit kind for a wire tag, or `None` if the tag is unknown.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::None,
            1 => Self::Counts,
            2 => Self::Current,
            3 => Self::Power,
            4 => Self::Resistance,
            5 => Self::Tcmb,
            6 => Self::Angle,
            _ => return None,
        })
    }
}

impl fmt::Display for TimestreamUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Counts => "Counts",
            Self::Current => "Current",
            Self::Power => "Power",
            Self::Resistance => "Resistance",
            Self::Tcmb => "Tcmb",
            Self::Angle => "Angle",
        };
        f.write_str(name)
    }
}

/// A uniformly sampled series stamped with its start and stop times.
///
/// # Examples
///
/// ```
/// use tod_frame::{Time, Timestream, TimestreamUnits};
///
/// let mut ts = Timestream::new(vec![0.0, 1.0, 2.0], TimestreamUnits::Tcmb);
/// ts.start = Time::from_seconds(10.0);
/// ts.stop = Time::from_seconds(11.0);
/// assert_eq!(ts.len(), 3);
/// assert_eq!(ts.sample_rate(), Some(2.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timestream {
    /// Sample values.
    pub samples: Vec<f64>,
    /// Unit kind of the samples.
    pub units: TimestreamUnits,
    /// Time of the first sample.
    pub start: Time,
    /// Time of the last sample.
    pub stop: Time,
}

impl Timestream {
    /// Create an unstamped timestream.
    pub fn new(samples: Vec<f64>, units: TimestreamUnits) -> Self {
        Self {
            samples,
            units,
            start: Time::default(),
            stop: Time::default(),
        }
    }

    /// Set start and stop, returning `self`.
    pub fn stamped(mut self, start: Time, stop: Time) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Span between start and stop, in seconds.
    pub fn duration(&self) -> f64 {
        (self.stop.ticks() - self.start.ticks()) as f64 / SECOND
    }

    /// Samples per second, treating start and stop as the first and last
    /// sample times. `None` with fewer than two samples or zero duration.
    pub fn sample_rate(&self) -> Option<f64> {
        let duration = self.duration();
        if self.samples.len() < 2 || duration <= 0.0 {
            return None;
        }
        Some((self.samples.len() - 1) as f64 / duration)
    }
}

impl fmt::Display for Timestream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples ({}) from {} to {}",
            self.len(),
            self.units,
            self.start,
            self.stop
        )
    }
}

/// Insertion-ordered detector name → [`Timestream`] map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimestreamMap {
    streams: IndexMap<String, Timestream>,
}

impl TimestreamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a timestream, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, ts: Timestream) -> Option<Timestream> {
        self.streams.insert(name.into(), ts)
    }

    /// Look up a detector's timestream.
    pub fn get(&self, name: &str) -> Option<&Timestream> {
        self.streams.get(name)
    }

    /// Iterate `(name, timestream)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Timestream)> {
        self.streams.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Detector names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.streams.keys().map(|k| k.as_str())
    }

    /// Number of timestreams.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Whether every member shares length, start, and stop.
    ///
    /// An empty map is aligned.
    pub fn is_aligned(&self) -> bool {
        let mut streams = self.streams.values();
        let Some(first) = streams.next() else {
            return true;
        };
        streams.all(|ts| {
            ts.len() == first.len() && ts.start == first.start && ts.stop == first.stop
        })
    }
}

impl FromIterator<(String, Timestream)> for TimestreamMap {
    fn from_iter<I: IntoIterator<Item = (String, Timestream)>>(iter: I) -> Self {
        Self {
            streams: iter.into_iter().collect(),
        }
    }
}
