//! Frame and value types.

use std::fmt;

use indexmap::IndexMap;

use crate::time::Time;
use crate::timestream::{Timestream, TimestreamMap};

/// The role of a frame within a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Per-observation header.
    Observation,
    /// One sample interval of an observation.
    Scan,
    /// End-of-stream marker.
    EndProcessing,
}

impl FrameType {
    /// Wire tag for this frame type.
    pub fn tag(self) -> u8 {
        match self {
            Self::Observation => 0,
            Self::Scan => 1,
            Self::EndProcessing => 2,
        }
    }

    /// Frame type for a wire tag, or `None` if the tag is unknown.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Observation),
            1 => Some(Self::Scan),
            2 => Some(Self::EndProcessing),
            _ => None,
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Observation => "Observation",
            Self::Scan => "Scan",
            Self::EndProcessing => "EndProcessing",
        };
        f.write_str(name)
    }
}

/// A value stored under a frame key.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point scalar.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Absolute timestamp.
    Time(Time),
    /// A single time-stamped series.
    Timestream(Timestream),
    /// Named collection of time-stamped series.
    TimestreamMap(TimestreamMap),
}

impl FrameValue {
    /// Short type name used in frame listings.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Time(_) => "time",
            Self::Timestream(_) => "timestream",
            Self::TimestreamMap(_) => "timestream map",
        }
    }
}

impl From<bool> for FrameValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FrameValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FrameValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for FrameValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FrameValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Time> for FrameValue {
    fn from(v: Time) -> Self {
        Self::Time(v)
    }
}

impl From<Timestream> for FrameValue {
    fn from(v: Timestream) -> Self {
        Self::Timestream(v)
    }
}

impl From<TimestreamMap> for FrameValue {
    fn from(v: TimestreamMap) -> Self {
        Self::TimestreamMap(v)
    }
}

impl fmt::Display for FrameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::Timestream(v) => write!(f, "{v}"),
            Self::TimestreamMap(m) => {
                write!(f, "{{")?;
                for (i, name) in m.names().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A typed, key/value record in a frame stream.
///
/// Keys keep their insertion order, which is also their on-disk order.
///
/// # Examples
///
/// ```
/// use tod_frame::{Frame, FrameType};
///
/// let mut frame = Frame::new(FrameType::Observation);
/// frame.insert("SourceName", "CMB-field1");
/// frame.insert("ObservationID", 20230504i64);
///
/// assert_eq!(frame.get_str("SourceName"), Some("CMB-field1"));
/// assert_eq!(frame.get_int("ObservationID"), Some(20230504));
/// assert!(!frame.contains_key("ToastID"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    frame_type: FrameType,
    entries: IndexMap<String, FrameValue>,
}

impl Frame {
    /// Create an empty frame of the given type.
    pub fn new(frame_type: FrameType) -> Self {
        Self {
            frame_type,
            entries: IndexMap::new(),
        }
    }

    /// The frame's type.
    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FrameValue>,
    ) -> Option<FrameValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up the value under `key`.
    pub fn get(&self, key: &str) -> Option<&FrameValue> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// String value under `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            FrameValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value under `key`, if present and an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            FrameValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value under `key`, if present and a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            FrameValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Timestream under `key`, if present and a timestream.
    pub fn get_timestream(&self, key: &str) -> Option<&Timestream> {
        match self.get(key)? {
            FrameValue::Timestream(ts) => Some(ts),
            _ => None,
        }
    }

    /// Timestream map under `key`, if present and a map.
    pub fn get_timestream_map(&self, key: &str) -> Option<&TimestreamMap> {
        match self.get(key)? {
            FrameValue::TimestreamMap(m) => Some(m),
            _ => None,
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frame has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame ({}) [", self.frame_type)?;
        for (key, value) in self.iter() {
            writeln!(f, "{key:?} ({}) => {value}", value.type_name())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestream::TimestreamUnits;

    #[test]
    fn typed_getters_reject_other_types() {
        let mut frame = Frame::new(FrameType::Scan);
        frame.insert("Selected", true);
        frame.insert("ObservationID", 7i64);
        assert_eq!(frame.get_bool("Selected"), Some(true));
        assert_eq!(frame.get_int("Selected"), None);
        assert_eq!(frame.get_str("ObservationID"), None);
        assert!(frame.get_timestream("missing").is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut frame = Frame::new(FrameType::Observation);
        frame.insert("a", 1i64);
        frame.insert("b", 2i64);
        assert_eq!(frame.insert("a", 3i64), Some(FrameValue::Int(1)));
        assert_eq!(frame.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn display_lists_entries_in_order() {
        let mut frame = Frame::new(FrameType::Observation);
        frame.insert("SourceName", "RCW38");
        frame.insert("ObservationID", 12i64);
        assert_eq!(
            frame.to_string(),
            "Frame (Observation) [\n\
             \"SourceName\" (string) => \"RCW38\"\n\
             \"ObservationID\" (int) => 12\n\
             ]"
        );
    }

    #[test]
    fn display_of_timestream_map_lists_names() {
        let mut map = TimestreamMap::new();
        map.insert("d0", Timestream::new(vec![], TimestreamUnits::Tcmb));
        map.insert("d1", Timestream::new(vec![], TimestreamUnits::Tcmb));
        assert_eq!(FrameValue::from(map).to_string(), "{d0, d1}");
    }

    #[test]
    fn frame_type_tags_roundtrip() {
        for ft in [FrameType::Observation, FrameType::Scan, FrameType::EndProcessing] {
            assert_eq!(FrameType::from_tag(ft.tag()), Some(ft));
        }
        assert_eq!(FrameType::from_tag(3), None);
    }

    #[test]
    fn empty_end_frame_displays() {
        let frame = Frame::new(FrameType::EndProcessing);
        assert!(frame.is_empty());
        assert_eq!(frame.to_string(), "Frame (EndProcessing) [\n]");
    }
}
