//! Core data model for exporting time-ordered data (TOD).
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! what the exporter reads: observations and their names, inclusive
//! sample intervals, the [`TodAccess`] trait, and an in-memory
//! [`Cache`]/[`MemoryTod`] pair that implements it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod interval;
pub mod name;
pub mod observation;
pub mod traits;

pub use cache::Cache;
pub use error::ModelError;
pub use interval::SampleInterval;
pub use name::ObservationName;
pub use observation::{Data, MemoryTod, Observation};
pub use traits::TodAccess;
