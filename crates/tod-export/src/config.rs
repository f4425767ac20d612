//! Export configuration, validation, and error types.
//!
//! [`ExportConfig`] carries the exporter's options.
//! [`validate()`](ExportConfig::validate) checks them before any frame
//! is written.

use std::error::Error;
use std::fmt;

use tod_frame::TimestreamUnits;

/// Scan-frame keys written by the exporter itself.
pub const RESERVED_SCAN_KEYS: [&str; 4] =
    ["SourceName", "ObservationID", "Selected", "BoresightAz"];

// ── EdgePolicy ─────────────────────────────────────────────────────

/// How sample regions before the first and after the last selected
/// interval are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Only gaps between consecutive selected intervals become scans.
    #[default]
    Omit,
    /// The head and tail of the local sample range also become
    /// unselected scans.
    Cover,
}

// ── ExportConfig ───────────────────────────────────────────────────

/// Options for [`export`](crate::export).
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Cache prefix of the detector series (`"<prefix>_<detector>"`) and
    /// the Scan-frame key of their timestream map. Default: `"total"`.
    pub timestreams: String,
    /// Print each frame to stdout before writing it. Default: false.
    pub verbose: bool,
    /// Treatment of head and tail regions. Default: [`EdgePolicy::Omit`].
    pub edge_policy: EdgePolicy,
    /// Unit kind tagged on detector timestreams. Default: `Tcmb`.
    pub detector_units: TimestreamUnits,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timestreams: "total".to_string(),
            verbose: false,
            edge_policy: EdgePolicy::Omit,
            detector_units: TimestreamUnits::Tcmb,
        }
    }
}

impl ExportConfig {
    /// Default configuration reading the series under `prefix`.
    pub fn with_timestreams(prefix: impl Into<String>) -> Self {
        Self {
            timestreams: prefix.into(),
            ..Self::default()
        }
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestreams.is_empty() {
            return Err(ConfigError::EmptyTimestreams);
        }
        if RESERVED_SCAN_KEYS.contains(&self.timestreams.as_str()) {
            return Err(ConfigError::ReservedTimestreamsKey {
                key: self.timestreams.clone(),
            });
        }
        Ok(())
    }

    /// Cache key of `detector`'s series.
    pub fn cache_key(&self, detector: &str) -> String {
        format!("{}_{detector}", self.timestreams)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ExportConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The timestreams prefix is empty.
    EmptyTimestreams,
    /// The timestreams prefix would overwrite a key the exporter writes.
    ReservedTimestreamsKey {
        /// The colliding key.
        key: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTimestreams => write!(f, "timestreams prefix must not be empty"),
            Self::ReservedTimestreamsKey { key } => {
                write!(f, "timestreams prefix '{key}' collides with a scan frame key")
            }
        }
    }
}

impl Error for ConfigError {}
