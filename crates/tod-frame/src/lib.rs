//! Framed record stream for exported time-ordered data.
//!
//! A stream is a sequence of typed key/value [`Frame`]s: one Observation
//! header per observation, the Scan frames belonging to it, and a single
//! EndProcessing frame at the end.
//!
//! # Architecture
//!
//! - [`FrameWriter`] encodes frames to any `Write` sink
//! - [`FrameReader`] decodes frames from any `Read` source
//! - [`FrameSink`] is the narrow seam producers write through
//! - All I/O uses a custom binary codec (no serde dependency)
//!
//! # Format
//!
//! ```text
//! [MAGIC "TODF"] [VERSION u8]
//! [Record 1] [Record 2] ... [Record N]
//! ```
//!
//! Each record is a length-prefixed frame body followed by an FNV-1a
//! checksum of that body.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;
pub mod reader;
pub mod time;
pub mod timestream;
pub mod types;
pub mod units;
pub mod writer;

pub use error::FrameError;
pub use hash::frame_checksum;
pub use reader::{FrameIter, FrameReader};
pub use time::Time;
pub use timestream::{Timestream, TimestreamMap, TimestreamUnits};
pub use types::{Frame, FrameType, FrameValue};
pub use writer::{FrameSink, FrameWriter};

/// Magic bytes at the start of every frame file.
pub const MAGIC: [u8; 4] = *b"TODF";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
