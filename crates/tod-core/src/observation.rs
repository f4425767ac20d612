//! Observations, the observation collection, and an in-memory TOD.

use std::fmt;

use crate::cache::Cache;
use crate::error::ModelError;
use crate::interval::SampleInterval;
use crate::name::ObservationName;
use crate::traits::TodAccess;

/// Time-ordered data held entirely in memory.
///
/// Times and boresight azimuth are stored directly; detector timestreams
/// and derived quantities live in the [`Cache`].
#[derive(Clone, Debug)]
pub struct MemoryTod {
    times: Vec<f64>,
    boresight_az: Vec<f64>,
    local_samples: (usize, usize),
    local_dets: Vec<String>,
    cache: Cache,
}

impl MemoryTod {
    /// Build a TOD over `times` and `boresight_az`.
    ///
    /// `local_samples` must be ascending, and both series must cover the
    /// last local sample.
    pub fn new(
        times: Vec<f64>,
        boresight_az: Vec<f64>,
        local_samples: (usize, usize),
        local_dets: Vec<String>,
    ) -> Result<Self, ModelError> {
        let (first, last) = local_samples;
        if last < first {
            return Err(ModelError::InvalidLocalSamples { first, last });
        }
        for (series, len) in [("times", times.len()), ("boresight_az", boresight_az.len())] {
            if len <= last {
                return Err(ModelError::SeriesTooShort {
                    series: series.to_string(),
                    len,
                    required: last + 1,
                });
            }
        }
        Ok(Self {
            times,
            boresight_az,
            local_samples,
            local_dets,
            cache: Cache::new(),
        })
    }

    /// The cache holding named sample series.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Mutable access to the cache, for populating detector data.
    pub fn cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }
}

impl TodAccess for MemoryTod {
    fn read_times(&self) -> &[f64] {
        &self.times
    }

    fn read_boresight_az(&self) -> &[f64] {
        &self.boresight_az
    }

    fn local_samples(&self) -> (usize, usize) {
        self.local_samples
    }

    fn local_dets(&self) -> &[String] {
        &self.local_dets
    }

    fn cache_reference(&self, name: &str) -> Option<&[f64]> {
        self.cache.reference(name)
    }
}

/// One observation: a named span of time-ordered data.
pub struct Observation {
    /// Composite `"<source>-<id>"` name.
    pub name: String,
    /// Optional external identifier, passed through as `ToastID`.
    pub id: Option<i64>,
    /// Full detector set of the observation (local or not).
    pub detectors: Vec<String>,
    /// Selected regions, inclusive on both ends.
    pub intervals: Vec<SampleInterval>,
    /// Accessor for the observation's samples.
    pub tod: Box<dyn TodAccess>,
}

impl Observation {
    /// Parse [`name`](Self::name) into source and numeric ID.
    pub fn parsed_name(&self) -> Result<ObservationName, ModelError> {
        self.name.parse()
    }
}

impl fmt::Debug for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("detectors", &self.detectors)
            .field("intervals", &self.intervals)
            .field("local_samples", &self.tod.local_samples())
            .finish_non_exhaustive()
    }
}

/// An ordered collection of observations.
#[derive(Debug, Default)]
pub struct Data {
    /// Observations in processing order.
    pub obs: Vec<Observation>,
}

impl Data {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation.
    pub fn push(&mut self, obs: Observation) {
        self.obs.push(obs);
    }

    /// Iterate observations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.obs.iter()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.obs.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Data {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.obs.iter()
    }
}
