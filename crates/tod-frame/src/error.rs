//! Error types for the frame format.

use std::fmt;
use std::io;

/// Errors that can occur while writing or reading a frame stream.
#[derive(Debug)]
pub enum FrameError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The file does not start with the expected `b"TODF"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the file.
        found: u8,
    },
    /// A record could not be decoded (truncated or corrupt data).
    MalformedFrame {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A frame type tag is not recognized.
    UnknownFrameType {
        /// The unrecognized tag.
        tag: u8,
    },
    /// A value type tag is not recognized.
    UnknownValueType {
        /// The unrecognized tag.
        tag: u8,
    },
    /// A timestream units tag is not recognized.
    UnknownUnits {
        /// The unrecognized tag.
        tag: u8,
    },
    /// A record body does not match its stored checksum.
    ChecksumMismatch {
        /// Checksum stored after the body.
        recorded: u64,
        /// Checksum computed over the body as read.
        computed: u64,
    },
    /// A frame was written after the stream was terminated or closed.
    StreamClosed,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"TODF\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedFrame { detail } => write!(f, "malformed frame: {detail}"),
            Self::UnknownFrameType { tag } => write!(f, "unknown frame type tag {tag}"),
            Self::UnknownValueType { tag } => write!(f, "unknown value type tag {tag}"),
            Self::UnknownUnits { tag } => write!(f, "unknown timestream units tag {tag}"),
            Self::ChecksumMismatch { recorded, computed } => {
                write!(
                    f,
                    "checksum mismatch: recorded={recorded:#018x}, computed={computed:#018x}"
                )
            }
            Self::StreamClosed => write!(f, "frame written after end of stream"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FrameError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
