//! Export time-ordered data as a framed Observation/Scan stream.
//!
//! [`export`] walks an observation collection and writes, per
//! observation, an Observation header frame followed by one Scan frame
//! per selected interval and per gap between selected intervals. Each Scan
//! carries the boresight azimuth and a map of detector timestreams over
//! the interval's locally available samples. The stream ends with a
//! single EndProcessing frame.
//!
//! ```no_run
//! use tod_core::Data;
//! use tod_export::{export_to_path, ExportConfig};
//!
//! let data = Data::new();
//! let config = ExportConfig {
//!     verbose: true,
//!     ..ExportConfig::default()
//! };
//! export_to_path(&data, "obs.todf", &config).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod exporter;
pub mod interval;

pub use config::{ConfigError, EdgePolicy, ExportConfig};
pub use error::ExportError;
pub use exporter::{export, export_to_path, ExportStats};
pub use interval::{clamp, partition, ScanInterval, SkipReason};
