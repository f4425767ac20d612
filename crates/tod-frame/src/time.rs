//! Absolute timestamps in 10 ns ticks.

use std::fmt;

use chrono::DateTime;

use crate::units::SECOND;

const TICKS_PER_SECOND: i64 = SECOND as i64;

/// A UNIX timestamp stored as 10 ns ticks since the epoch.
///
/// # Examples
///
/// ```
/// use tod_frame::Time;
///
/// let t = Time::from_seconds(1.5);
/// assert_eq!(t.ticks(), 150_000_000);
/// assert_eq!(t.to_string(), "1970-01-01T00:00:01.500000000Z");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time(i64);

impl Time {
    /// Wrap a raw tick count.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Convert UNIX seconds to ticks, truncating toward zero.
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * SECOND) as i64)
    }

    /// Raw tick count.
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// UNIX seconds.
    pub fn seconds(self) -> f64 {
        self.0 as f64 / SECOND
    }
}

impl From<i64> for Time {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.div_euclid(TICKS_PER_SECOND);
        let nanos = (self.0.rem_euclid(TICKS_PER_SECOND) * 10) as u32;
        match DateTime::from_timestamp(secs, nanos) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.9fZ")),
            None => write!(f, "{} ticks", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn truncates_sub_tick_fractions() {
        assert_eq!(Time::from_seconds(1.0 + 4e-9).ticks(), 100_000_000);
        assert_eq!(Time::from_seconds(-1.5).ticks(), -150_000_000);
    }

    #[test]
    fn display_before_epoch() {
        assert_eq!(
            Time::from_ticks(-50_000_000).to_string(),
            "1969-12-31T23:59:59.500000000Z"
        );
    }

    #[test]
    fn display_of_a_modern_date() {
        // 2023-05-04T00:00:00Z
        let t = Time::from_seconds(1_683_158_400.0);
        assert_eq!(t.to_string(), "2023-05-04T00:00:00.000000000Z");
    }

    proptest! {
        #[test]
        fn ordering_follows_ticks(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Time::from_ticks(a) < Time::from_ticks(b), a < b);
        }

        #[test]
        fn whole_seconds_convert_exactly(s in -1_000_000_000i64..4_000_000_000) {
            let t = Time::from_seconds(s as f64);
            prop_assert_eq!(t.ticks(), s * TICKS_PER_SECOND);
            prop_assert_eq!(t.seconds(), s as f64);
        }
    }
}
