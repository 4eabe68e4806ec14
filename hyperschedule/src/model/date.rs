//! Calendar date type.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::MaintainerError;

/// Years a [`Date`] may fall in. Four digits keep the wire form parseable.
const YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Human formats tried after the canonical `Y-M-D` form.
///
/// `%Y` accepts any number of digits, so a two-digit year lands far out
/// of range and falls through to the matching `%y` form (1970-2069).
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%m-%d-%y",
    "%B %d, %Y",
    "%B %d, %y",
    "%B %d %Y",
    "%B %d %y",
    "%d %B %Y",
    "%d %B %y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
];

/// Date-time formats whose date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A specific day of the year.
///
/// Dates are built from whatever string a scraper has to hand. The
/// suggested format is `YYYY-MM-DD`, but month names, US slash dates and
/// full timestamps are understood as well. Anything finer than a day is
/// discarded.
///
/// On the wire a date is the unpadded string `"YYYY-M-D"`.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::Date;
///
/// let d = Date::parse("2024-09-01").unwrap();
/// assert_eq!(d.wire(), "2024-9-1");
/// assert_eq!(d.to_string(), "1 Sep 2024");
///
/// assert_eq!(Date::parse("September 1, 2024").unwrap(), d);
/// assert!(Date::parse("someday").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    /// Parse a date, trying hard to make sense of the input.
    pub fn parse(s: &str) -> Result<Self, MaintainerError> {
        let trimmed = s.trim();

        let candidates = parse_wire(trimmed)
            .into_iter()
            .chain(
                DATE_FORMATS
                    .iter()
                    .filter_map(|format| NaiveDate::parse_from_str(trimmed, format).ok()),
            )
            .chain(DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
            .chain(
                DATETIME_FORMATS
                    .iter()
                    .filter_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                    .map(|dt| dt.date()),
            );

        let mut candidates = candidates.peekable();
        if candidates.peek().is_none() {
            return Err(MaintainerError::unparseable("Date", s));
        }
        candidates
            .find(|date| YEARS.contains(&date.year()))
            .map(Date)
            .ok_or_else(|| MaintainerError::invalid("Date", s, "year must have four digits"))
    }

    /// Build a date from numeric components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, MaintainerError> {
        if !YEARS.contains(&year) {
            return Err(MaintainerError::invalid(
                "Date",
                format!("{year}-{month}-{day}"),
                "year must have four digits",
            ));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| {
                MaintainerError::invalid("Date", format!("{year}-{month}-{day}"), "no such day")
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the canonical wire form, `YYYY-M-D`.
    pub fn wire(&self) -> String {
        format!("{}-{}-{}", self.year(), self.month(), self.day())
    }
}

/// Parse the unpadded `Y-M-D` form this crate serializes.
fn parse_wire(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '-');
    let year = digits(parts.next()?).filter(|y| y.len() == 4)?.parse().ok()?;
    let month = digits(parts.next()?)?.parse().ok()?;
    let day = digits(parts.next()?)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn digits(s: &str) -> Option<&str> {
    (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())).then_some(s)
}

impl TryFrom<String> for Date {
    type Error = MaintainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Date::parse(&value)
    }
}

impl From<Date> for String {
    fn from(value: Date) -> Self {
        value.wire()
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.wire())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-d %b %Y"))
    }
}
