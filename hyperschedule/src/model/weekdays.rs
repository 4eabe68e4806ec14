//! Days of the week.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::MaintainerError;

/// A single day of the week.
///
/// Variants are declared in canonical weekly order, which is also the
/// order used for comparison and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Look up a day by its one-letter code (`MTWRFSU`), case-insensitively.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'M' => Some(Day::Monday),
            'T' => Some(Day::Tuesday),
            'W' => Some(Day::Wednesday),
            'R' => Some(Day::Thursday),
            'F' => Some(Day::Friday),
            'S' => Some(Day::Saturday),
            'U' => Some(Day::Sunday),
            _ => None,
        }
    }

    /// Returns the one-letter code for this day.
    pub fn code(self) -> char {
        match self {
            Day::Monday => 'M',
            Day::Tuesday => 'T',
            Day::Wednesday => 'W',
            Day::Thursday => 'R',
            Day::Friday => 'F',
            Day::Saturday => 'S',
            Day::Sunday => 'U',
        }
    }
}

/// Some subset of the days of the week.
///
/// A fresh `Weekdays` is empty. That is fine while a session is being
/// assembled, but a built [`Session`](super::Session) always meets on at
/// least one day.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::Weekdays;
///
/// let days = Weekdays::parse("fwm").unwrap();
/// assert_eq!(days.to_string(), "MWF");
///
/// assert!(Weekdays::parse("MXF").is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Weekdays(BTreeSet<Day>);

impl Weekdays {
    /// Create an empty set of days.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a string of day codes such as `"MWF"`.
    pub fn parse(s: &str) -> Result<Self, MaintainerError> {
        let mut days = Self::new();
        for code in s.chars() {
            days.add_day(code)?;
        }
        Ok(days)
    }

    /// Add a day by code.
    ///
    /// Returns `false` if the day was already present. That is suspicious
    /// but not fatal, so it is logged rather than rejected.
    pub fn add_day(&mut self, code: char) -> Result<bool, MaintainerError> {
        let day = Day::from_code(code)
            .ok_or_else(|| MaintainerError::invalid("day", code, "expected one of MTWRFSU"))?;
        let added = self.0.insert(day);
        if !added {
            warn!(day = %day.code(), "add_day got same day more than once");
        }
        Ok(added)
    }

    /// Fails if no day has been added.
    pub fn check_valid(&self) -> Result<(), MaintainerError> {
        if self.0.is_empty() {
            return Err(MaintainerError::Empty("weekdays"));
        }
        Ok(())
    }

    pub fn contains(&self, day: Day) -> bool {
        self.0.contains(&day)
    }

    /// Iterate over the days in weekly order.
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Weekdays {
    type Error = MaintainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Weekdays::parse(&value)
    }
}

impl From<Weekdays> for String {
    fn from(value: Weekdays) -> Self {
        value.to_string()
    }
}

impl fmt::Debug for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weekdays({self})")
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.days().try_for_each(|day| write!(f, "{}", day.code()))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: display then parse returns the original
        #[test]
        fn roundtrip(s in "[MTWRFSUmtwrfsu]{0,10}") {
            let days = Weekdays::parse(&s).unwrap();
            prop_assert_eq!(Weekdays::parse(&days.to_string()).unwrap(), days);
        }

        /// Adding a day already present changes nothing
        #[test]
        fn add_day_idempotent(s in "[MTWRFSU]{1,7}", idx in 0usize..7) {
            let mut days = Weekdays::parse(&s).unwrap();
            let code = s.chars().nth(idx % s.len()).unwrap();
            let before = days.clone();
            prop_assert!(!days.add_day(code).unwrap());
            prop_assert_eq!(days, before);
        }

        /// Rendering never has more than seven codes
        #[test]
        fn at_most_seven_days(s in "[MTWRFSU]{0,20}") {
            prop_assert!(Weekdays::parse(&s).unwrap().to_string().len() <= 7);
        }
    }
}
