//! Benchmark profiles for the TOD frame exporter.
//!
//! - [`reference_profile`]: 4 observations x 32 detectors x 20K samples,
//!   with selected intervals every 2K samples
//! - [`interval_layout`]: the interval pattern shared by the profiles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tod_core::{Data, SampleInterval};
use tod_test_utils::synthetic_observation;

/// Selected intervals of `len` samples starting every `period` samples.
pub fn interval_layout(n_samples: usize, period: usize, len: usize) -> Vec<SampleInterval> {
    (0..n_samples)
        .step_by(period)
        .filter(|start| start + len <= n_samples)
        .map(|start| SampleInterval {
            first: start,
            last: start + len - 1,
        })
        .collect()
}

/// Build a collection of `n_obs` synthetic observations.
pub fn profile(n_obs: usize, n_dets: usize, n_samples: usize) -> Data {
    let names: Vec<String> = (0..n_dets).map(|d| format!("det{d:03}")).collect();
    let dets: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let intervals = interval_layout(n_samples, 2_000, 1_500);
    Data {
        obs: (0..n_obs)
            .map(|i| {
                synthetic_observation(&format!("RCW38-{}", 1000 + i), n_samples, &dets, &intervals)
            })
            .collect(),
    }
}

/// Reference benchmark profile: 4 observations x 32 detectors x 20K samples.
pub fn reference_profile() -> Data {
    profile(4, 32, 20_000)
}
