//! Reusable synthetic observations.
//!
//! Every fixture samples at [`SAMPLE_RATE`] starting at [`T0`], with the
//! whole observation local: `local_samples = (0, n_samples - 1)`.
//!
//! - [`synthetic_tod`]: times, an azimuth ramp, and one cached series per
//!   detector under a given prefix.
//! - [`synthetic_observation`]: wraps a `"total"`-prefixed TOD.
//! - [`with_constant_times`]: every sample at the same instant, for
//!   zero-duration cases.

use tod_core::{MemoryTod, Observation, SampleInterval};

/// Start time of every fixture, UNIX seconds (2023-05-04T00:00:00Z).
pub const T0: f64 = 1_683_158_400.0;

/// Samples per second.
pub const SAMPLE_RATE: f64 = 100.0;

/// Build a fully local TOD with `n_samples` samples.
///
/// Detector `k` gets the series `k * 1000 + i` under `"<prefix>_<det>"`.
pub fn synthetic_tod(n_samples: usize, detectors: &[&str], prefix: &str) -> MemoryTod {
    assert!(n_samples > 0, "fixtures need at least one sample");
    let times: Vec<f64> = (0..n_samples)
        .map(|i| T0 + i as f64 / SAMPLE_RATE)
        .collect();
    let az: Vec<f64> = (0..n_samples).map(|i| 0.01 * i as f64).collect();
    let dets: Vec<String> = detectors.iter().map(|d| d.to_string()).collect();

    let mut tod = MemoryTod::new(times, az, (0, n_samples - 1), dets).unwrap();
    for (k, det) in detectors.iter().enumerate() {
        let series = (0..n_samples).map(|i| (k * 1000 + i) as f64).collect();
        tod.cache_mut().put(format!("{prefix}_{det}"), series);
    }
    tod
}

/// Like [`synthetic_tod`] with prefix `"total"`, but every sample has
/// time `t`.
pub fn with_constant_times(n_samples: usize, detectors: &[&str], t: f64) -> MemoryTod {
    let dets: Vec<String> = detectors.iter().map(|d| d.to_string()).collect();
    let mut tod = MemoryTod::new(
        vec![t; n_samples],
        vec![0.0; n_samples],
        (0, n_samples - 1),
        dets,
    )
    .unwrap();
    for det in detectors {
        tod.cache_mut()
            .put(format!("total_{det}"), vec![0.0; n_samples]);
    }
    tod
}

/// Observation named `name` over a `"total"`-prefixed synthetic TOD.
pub fn synthetic_observation(
    name: &str,
    n_samples: usize,
    detectors: &[&str],
    intervals: &[SampleInterval],
) -> Observation {
    synthetic_observation_with_prefix(name, n_samples, detectors, intervals, "total")
}

/// Observation named `name` over a synthetic TOD cached under `prefix`.
pub fn synthetic_observation_with_prefix(
    name: &str,
    n_samples: usize,
    detectors: &[&str],
    intervals: &[SampleInterval],
    prefix: &str,
) -> Observation {
    Observation {
        name: name.to_string(),
        id: None,
        detectors: detectors.iter().map(|d| d.to_string()).collect(),
        intervals: intervals.to_vec(),
        tod: Box::new(synthetic_tod(n_samples, detectors, prefix)),
    }
}
