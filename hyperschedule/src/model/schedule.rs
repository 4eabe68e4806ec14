//! A course's meeting schedule.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Session;

/// The set of all of a course's recurring meeting sessions.
///
/// Schedules compare as the sorted sequence of their sessions, and
/// serialize as that same sorted sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<Session>", into = "Vec<Session>")]
pub struct Schedule(BTreeSet<Session>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session.
    ///
    /// Returns `false` (and logs a warning) if an identical session is
    /// already present; the schedule is unchanged in that case.
    pub fn add_session(&mut self, session: Session) -> bool {
        if self.0.contains(&session) {
            warn!(session = %session, "add_session got same session more than once");
            return false;
        }
        self.0.insert(session)
    }

    /// Iterate over sessions in sorted order.
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Session> for Schedule {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        let mut schedule = Schedule::new();
        for session in iter {
            schedule.add_session(session);
        }
        schedule
    }
}

impl From<Vec<Session>> for Schedule {
    fn from(sessions: Vec<Session>) -> Self {
        sessions.into_iter().collect()
    }
}

impl From<Schedule> for Vec<Session> {
    fn from(schedule: Schedule) -> Self {
        schedule.0.into_iter().collect()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, session) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{session}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Time, Weekdays};

    fn session(days: &str, start: &str, end: &str) -> Session {
        let mut b = Session::builder();
        b.set_weekdays(Weekdays::parse(days).unwrap())
            .set_times(Time::parse(start).unwrap(), Time::parse(end).unwrap())
            .unwrap();
        b.build().unwrap()
    }

    #[test]
    fn duplicate_session_is_a_noop() {
        let mut schedule = Schedule::new();
        assert!(schedule.add_session(session("MWF", "9:00", "9:50")));
        assert!(!schedule.add_session(session("MWF", "9:00", "9:50")));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn sessions_are_sorted() {
        let schedule: Schedule = vec![
            session("T", "9:00", "10:00"),
            session("M", "14:00", "15:00"),
            session("M", "9:00", "10:00"),
        ]
        .into();
        let starts: Vec<String> = schedule
            .sessions()
            .map(|s| format!("{} {}", s.weekdays(), s.start_time().wire()))
            .collect();
        assert_eq!(starts, vec!["M 09:00", "M 14:00", "T 09:00"]);
    }

    #[test]
    fn display_joins_sorted_sessions() {
        let schedule: Schedule = vec![session("R", "13:00", "14:00"), session("M", "9:00", "10:00")]
            .into_iter()
            .collect();
        assert_eq!(
            schedule.to_string(),
            "M 9:00 AM - 10:00 AM, R 1:00 PM - 2:00 PM"
        );
        assert_eq!(Schedule::new().to_string(), "");
    }

    #[test]
    fn ordering_is_over_sorted_sessions() {
        let a: Schedule = vec![session("M", "9:00", "10:00")].into();
        let b: Schedule =
            vec![session("M", "9:00", "10:00"), session("T", "9:00", "10:00")].into();
        let c: Schedule = vec![session("T", "9:00", "10:00")].into();
        assert!(Schedule::new() < a);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn serde_is_sorted_array() {
        let schedule: Schedule =
            vec![session("W", "9:00", "10:00"), session("M", "9:00", "10:00")].into();
        let value = serde_json::to_value(&schedule).unwrap();
        let days: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["scheduleWeekdays"].as_str().unwrap())
            .collect();
        assert_eq!(days, vec!["M", "W"]);

        let back: Schedule = serde_json::from_value(value).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn deserialize_collapses_duplicates() {
        let one = serde_json::to_value(session("F", "9:00", "10:00")).unwrap();
        let doubled = serde_json::Value::Array(vec![one.clone(), one]);
        let schedule: Schedule = serde_json::from_value(doubled).unwrap();
        assert_eq!(schedule.len(), 1);
    }
}
