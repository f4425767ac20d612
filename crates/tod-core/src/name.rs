//! Observation name parsing.
//!
//! Observation names carry the source and the numeric observation ID as
//! `"<source>-<id>"`. The source may itself contain dashes; only the last
//! segment is the ID.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The parsed parts of an observation name.
///
/// # Examples
///
/// ```
/// use tod_core::ObservationName;
///
/// let name: ObservationName = "CMB-field1-20230504".parse().unwrap();
/// assert_eq!(name.source, "CMB-field1");
/// assert_eq!(name.id, 20230504);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObservationName {
    /// Everything before the last `-`. Empty when the name has no `-`.
    pub source: String,
    /// The trailing numeric segment.
    pub id: i64,
}

impl FromStr for ObservationName {
    type Err = ModelError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let (source, id) = name.rsplit_once('-').unwrap_or(("", name));
        let id = id
            .parse::<i64>()
            .map_err(|e| ModelError::InvalidObservationName {
                name: name.to_string(),
                reason: format!("trailing segment '{id}' is not an integer: {e}"),
            })?;
        Ok(Self {
            source: source.to_string(),
            id,
        })
    }
}

impl fmt::Display for ObservationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}-{}", self.source, self.id)
        }
    }
}
