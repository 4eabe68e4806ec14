//! Time-of-day type.
//!
//! Scrapers see times in every shape imaginable ("9:00", "9:00am",
//! "21:00:00", "noon"). `Time` accepts all of these and keeps only the
//! hour and minute.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::MaintainerError;

/// Clock formats, tried in order. The first is the wire form.
const TIME_FORMATS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S",
    "%I:%M %p",
    "%I:%M%p",
    "%I:%M:%S %p",
    "%I:%M:%S%p",
    "%H.%M",
];

/// Date-time formats whose time part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A time of day with minute precision.
///
/// Serialized as zero-padded 24-hour `"HH:MM"`; displayed on a 12-hour
/// clock.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::Time;
///
/// let t = Time::parse("1:30 pm").unwrap();
/// assert_eq!(t.wire(), "13:30");
/// assert_eq!(t.to_string(), "1:30 PM");
///
/// assert_eq!(Time::parse("13:30").unwrap(), t);
/// assert!(Time::parse("25:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time(NaiveTime);

impl Time {
    /// Parse a time of day, trying hard to make sense of the input.
    pub fn parse(s: &str) -> Result<Self, MaintainerError> {
        let trimmed = s.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "noon" => return Self::from_hm(12, 0),
            "midnight" => return Self::from_hm(0, 0),
            _ => {}
        }

        for format in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
                return Self::from_hm(time.hour(), time.minute());
            }
        }

        if let Some(hour) = parse_bare_hour(trimmed) {
            return Self::from_hm(hour, 0);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::from_hm(dt.hour(), dt.minute());
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::from_hm(dt.hour(), dt.minute());
            }
        }

        Err(MaintainerError::unparseable("Time", s))
    }

    /// Build a time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, MaintainerError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Time)
            .ok_or_else(|| {
                MaintainerError::invalid(
                    "Time",
                    format!("{hour}:{minute}"),
                    "hour must be 0-23 and minute 0-59",
                )
            })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the canonical wire form, `HH:MM`.
    pub fn wire(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse "9am", "9 PM" and friends, returning a 24-hour hour.
fn parse_bare_hour(s: &str) -> Option<u32> {
    let lower = s.to_ascii_lowercase();
    let (digits, pm) = if let Some(rest) = lower.strip_suffix("am") {
        (rest, false)
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest, true)
    } else {
        return None;
    };

    let hour: u32 = digits.trim_end().parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}

impl TryFrom<String> for Time {
    type Error = MaintainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Time::parse(&value)
    }
}

impl From<Time> for String {
    fn from(value: Time) -> Self {
        value.wire()
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({})", self.wire())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-I:%M %p"))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: wire then parse returns the original
        #[test]
        fn wire_roundtrip(h in 0u32..24, m in 0u32..60) {
            let t = Time::from_hm(h, m).unwrap();
            prop_assert_eq!(Time::parse(&t.wire()).unwrap(), t);
        }

        /// The 12-hour rendering parses back to the same time
        #[test]
        fn display_roundtrip(h in 0u32..24, m in 0u32..60) {
            let t = Time::from_hm(h, m).unwrap();
            prop_assert_eq!(Time::parse(&t.to_string()).unwrap(), t);
        }

        /// Ordering matches (hour, minute) tuples
        #[test]
        fn ordering_matches_components(a in (0u32..24, 0u32..60), b in (0u32..24, 0u32..60)) {
            let ta = Time::from_hm(a.0, a.1).unwrap();
            let tb = Time::from_hm(b.0, b.1).unwrap();
            prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        }
    }
}
