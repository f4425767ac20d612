//! Error types for the exporter.

use std::error::Error;
use std::fmt;

use tod_core::ModelError;
use tod_frame::FrameError;

use crate::config::ConfigError;

/// Errors that abort an export run.
///
/// Any error leaves the output stream without its EndProcessing frame.
#[derive(Debug)]
pub enum ExportError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// An observation could not be interpreted (e.g. a malformed name).
    Model(ModelError),
    /// Writing a frame failed.
    Frame(FrameError),
    /// A local detector has no cached series under the expected key.
    MissingTimestream {
        /// Name of the observation being exported.
        observation: String,
        /// The cache key that was looked up.
        key: String,
    },
    /// A series is too short for the requested sample range.
    SampleOutOfRange {
        /// Name of the observation being exported.
        observation: String,
        /// Name of the series.
        series: String,
        /// The sample index (or exclusive stop) that was requested.
        index: usize,
        /// Length of the series.
        len: usize,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid export configuration: {e}"),
            Self::Model(e) => write!(f, "{e}"),
            Self::Frame(e) => write!(f, "frame output failed: {e}"),
            Self::MissingTimestream { observation, key } => {
                write!(f, "observation '{observation}': no cached series '{key}'")
            }
            Self::SampleOutOfRange {
                observation,
                series,
                index,
                len,
            } => write!(
                f,
                "observation '{observation}': sample {index} out of range for \
                 series '{series}' of length {len}"
            ),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::Frame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ExportError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ModelError> for ExportError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<FrameError> for ExportError {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}
