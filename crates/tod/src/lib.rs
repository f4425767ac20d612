//! TOD: export time-ordered detector data as framed record streams.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the TOD sub-crates. For most users, adding `tod` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tod::prelude::*;
//!
//! let times: Vec<f64> = (0..10).map(|i| 1_683_158_400.0 + i as f64 / 100.0).collect();
//! let mut memory = MemoryTod::new(times, vec![0.0; 10], (0, 9), vec!["d0".into()]).unwrap();
//! memory.cache_mut().put("total_d0", vec![1.0; 10]);
//!
//! let mut data = Data::new();
//! data.push(Observation {
//!     name: "RCW38-1000".into(),
//!     id: None,
//!     detectors: vec!["d0".into()],
//!     intervals: vec![SampleInterval::new(2, 5).unwrap()],
//!     tod: Box::new(memory),
//! });
//!
//! let mut writer = FrameWriter::new(Vec::new()).unwrap();
//! let stats = export(&data, &mut writer, &ExportConfig::default()).unwrap();
//! assert_eq!(stats.scans_written, 1);
//! assert!(writer.is_terminated());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`model`] | `tod-core` | Observations, intervals, caches, the TOD accessor trait |
//! | [`frame`] | `tod-frame` | Frames, timestreams, the record codec, readers and writers |
//! | [`exporter`] | `tod-export` | Interval partitioning and the exporter itself |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Observation model (`tod-core`).
///
/// Contains [`model::Observation`], [`model::SampleInterval`], the
/// [`model::Cache`], and the [`model::TodAccess`] trait every data source
/// implements.
pub use tod_core as model;

/// Framed record stream (`tod-frame`).
///
/// Build [`frame::Frame`]s, write them with [`frame::FrameWriter`] and
/// read them back with [`frame::FrameReader`].
pub use tod_frame as frame;

/// Observation export (`tod-export`).
pub use tod_export as exporter;

/// Common imports for typical exporter usage.
///
/// ```rust
/// use tod::prelude::*;
/// ```
pub mod prelude {
    // Model
    pub use tod_core::{Cache, Data, MemoryTod, Observation, SampleInterval, TodAccess};

    // Frames
    pub use tod_frame::{
        Frame, FrameReader, FrameSink, FrameType, FrameValue, FrameWriter, Time, Timestream,
        TimestreamMap, TimestreamUnits,
    };

    // Export
    pub use tod_export::{export, export_to_path, EdgePolicy, ExportConfig, ExportStats};

    // Errors
    pub use tod_core::ModelError;
    pub use tod_export::ExportError;
    pub use tod_frame::FrameError;
}
