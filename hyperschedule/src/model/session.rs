//! Recurring meeting sessions.
//!
//! A `Session` is one recurring meeting pattern of a course, e.g. "MWF
//! 9:00-9:50 in Room 101 for the first half of the term". Scrapers
//! assemble one with a [`SessionBuilder`], which validates each field as
//! it is set and performs the cross-field checks in [`SessionBuilder::build`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Date, MaintainerError, Subterm, Time, Weekdays};

/// A single recurring meeting pattern.
///
/// Field order is the ordering key: weekdays, start time, end time,
/// subterm, location, start date, end date. Unset optional fields sort
/// before set ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SessionWire", into = "SessionWire")]
pub struct Session {
    weekdays: Weekdays,
    start_time: Time,
    end_time: Time,
    subterm: Subterm,
    location: Option<String>,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

impl Session {
    /// Start assembling a new session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Reopen this session for editing.
    pub fn to_builder(&self) -> SessionBuilder {
        SessionBuilder {
            start_date: self.start_date,
            end_date: self.end_date,
            weekdays: Some(self.weekdays.clone()),
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            subterm: Some(self.subterm.clone()),
            location: self.location.clone(),
        }
    }

    pub fn weekdays(&self) -> &Weekdays {
        &self.weekdays
    }

    pub fn start_time(&self) -> Time {
        self.start_time
    }

    pub fn end_time(&self) -> Time {
        self.end_time
    }

    pub fn subterm(&self) -> &Subterm {
        &self.subterm
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// First day of meetings; `None` means "the start of the term".
    pub fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    /// Last day of meetings; `None` means "the end of the term".
    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, &self.to_builder())
    }
}

/// Mutable builder for a [`Session`].
///
/// Every setter validates before mutating, so a failed call leaves the
/// builder exactly as it was.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::{Session, Time, Weekdays};
///
/// let mut builder = Session::builder();
/// builder
///     .set_weekdays(Weekdays::parse("MWF").unwrap())
///     .set_times(Time::parse("9:00").unwrap(), Time::parse("9:50").unwrap())
///     .unwrap()
///     .set_location("Shanahan B460");
/// let session = builder.build().unwrap();
///
/// assert_eq!(session.to_string(), "MWF 9:00 AM - 9:50 AM, Shanahan B460");
///
/// // Times must run forwards.
/// assert!(builder
///     .set_times(Time::parse("9:00").unwrap(), Time::parse("8:00").unwrap())
///     .is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    weekdays: Option<Weekdays>,
    start_time: Option<Time>,
    end_time: Option<Time>,
    subterm: Option<Subterm>,
    location: Option<String>,
}

impl SessionBuilder {
    /// Set (or clear) both date bounds. The start must precede the end.
    pub fn set_dates(
        &mut self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<&mut Self, MaintainerError> {
        if let (Some(s), Some(e)) = (start, end) {
            check_order("dates", s, e)?;
        }
        self.start_date = start;
        self.end_date = end;
        Ok(self)
    }

    /// Set both times. The start must precede the end.
    pub fn set_times(&mut self, start: Time, end: Time) -> Result<&mut Self, MaintainerError> {
        check_order("times", start, end)?;
        self.start_time = Some(start);
        self.end_time = Some(end);
        Ok(self)
    }

    /// Set the start time, checking it against any end time already set.
    pub fn set_start_time(&mut self, start: Time) -> Result<&mut Self, MaintainerError> {
        if let Some(end) = self.end_time {
            check_order("times", start, end)?;
        }
        self.start_time = Some(start);
        Ok(self)
    }

    /// Set the end time, checking it against any start time already set.
    pub fn set_end_time(&mut self, end: Time) -> Result<&mut Self, MaintainerError> {
        if let Some(start) = self.start_time {
            check_order("times", start, end)?;
        }
        self.end_time = Some(end);
        Ok(self)
    }

    /// Set the meeting days. Emptiness is only checked by [`build`](Self::build).
    pub fn set_weekdays(&mut self, weekdays: Weekdays) -> &mut Self {
        self.weekdays = Some(weekdays);
        self
    }

    pub fn set_subterm(&mut self, subterm: Subterm) -> &mut Self {
        self.subterm = Some(subterm);
        self
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = Some(location.into());
        self
    }

    /// Check the session is complete and produce it.
    ///
    /// Weekdays (non-empty), start time and end time are required. The
    /// subterm defaults to the full term.
    pub fn build(&self) -> Result<Session, MaintainerError> {
        let weekdays = self
            .weekdays
            .clone()
            .ok_or(MaintainerError::Missing("weekdays"))?;
        weekdays.check_valid()?;
        let start_time = self.start_time.ok_or(MaintainerError::Missing("start_time"))?;
        let end_time = self.end_time.ok_or(MaintainerError::Missing("end_time"))?;

        Ok(Session {
            weekdays,
            start_time,
            end_time,
            subterm: self.subterm.clone().unwrap_or_default(),
            location: self.location.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

impl fmt::Display for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self)
    }
}

fn check_order<T: PartialOrd + fmt::Display>(
    field: &'static str,
    start: T,
    end: T,
) -> Result<(), MaintainerError> {
    if start < end {
        Ok(())
    } else {
        Err(MaintainerError::out_of_order(field, start, end))
    }
}

/// Render comma-separated groups: days and times, date range, a
/// non-default subterm, location.
fn render(f: &mut fmt::Formatter<'_>, s: &SessionBuilder) -> fmt::Result {
    let mut groups: Vec<String> = Vec::new();

    let mut when: Vec<String> = Vec::new();
    if let Some(weekdays) = s.weekdays.as_ref().filter(|w| !w.is_empty()) {
        when.push(weekdays.to_string());
    }
    if let Some(start) = s.start_time {
        when.push(start.to_string());
    }
    if let Some(end) = s.end_time {
        when.push("-".to_owned());
        when.push(end.to_string());
    }
    if !when.is_empty() {
        groups.push(when.join(" "));
    }

    match (s.start_date, s.end_date) {
        (Some(start), Some(end)) => groups.push(format!("{start} - {end}")),
        (Some(start), None) => groups.push(format!("from {start}")),
        (None, Some(end)) => groups.push(format!("until {end}")),
        (None, None) => {}
    }

    if let Some(subterm) = s.subterm.as_ref().filter(|t| !t.is_full_term()) {
        groups.push(subterm.to_string());
    }

    if let Some(location) = &s.location {
        groups.push(location.clone());
    }

    if groups.is_empty() {
        return f.write_str("(empty session)");
    }
    f.write_str(&groups.join(", "))
}

/// Wire representation of a [`Session`].
#[derive(Serialize, Deserialize)]
struct SessionWire {
    #[serde(rename = "scheduleStartDate", default)]
    start_date: Option<Date>,
    #[serde(rename = "scheduleEndDate", default)]
    end_date: Option<Date>,
    #[serde(rename = "scheduleWeekdays", alias = "scheduleDays")]
    weekdays: Weekdays,
    #[serde(rename = "scheduleStartTime")]
    start_time: Time,
    #[serde(rename = "scheduleEndTime")]
    end_time: Time,
    #[serde(rename = "scheduleSubterm", alias = "scheduleSubterms", default)]
    subterm: Option<Subterm>,
    #[serde(rename = "scheduleLocation", default)]
    location: Option<String>,
}

impl TryFrom<SessionWire> for Session {
    type Error = MaintainerError;

    fn try_from(wire: SessionWire) -> Result<Self, Self::Error> {
        let mut builder = Session::builder();
        builder
            .set_dates(wire.start_date, wire.end_date)?
            .set_times(wire.start_time, wire.end_time)?
            .set_weekdays(wire.weekdays);
        if let Some(subterm) = wire.subterm {
            builder.set_subterm(subterm);
        }
        if let Some(location) = wire.location {
            builder.set_location(location);
        }
        builder.build()
    }
}

impl From<Session> for SessionWire {
    fn from(session: Session) -> Self {
        SessionWire {
            start_date: session.start_date,
            end_date: session.end_date,
            weekdays: session.weekdays,
            start_time: session.start_time,
            end_time: session.end_time,
            subterm: Some(session.subterm),
            location: session.location,
        }
    }
}
