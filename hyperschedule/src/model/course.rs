//! Courses, the core abstraction of Hyperschedule.
//!
//! Each course is displayed as a separate object on the frontend.
//! Courses do not have sections; sections are represented by separate
//! `Course` values, typically sharing a mutual-exclusion key.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Key, MaintainerError, Schedule};

/// A nonnegative, finite number of credits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Credits(f64);

impl Credits {
    pub fn new(value: f64) -> Result<Self, MaintainerError> {
        if !value.is_finite() {
            return Err(MaintainerError::invalid("num_credits", value, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(MaintainerError::invalid("num_credits", value, "must be nonnegative"));
        }
        // Normalize -0.0 so equality and hashing agree.
        Ok(Credits(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Credits {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Credits {}

impl Ord for Credits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Credits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Credits {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Credits {
    type Error = MaintainerError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Credits::new(value)
    }
}

impl From<Credits> for f64 {
    fn from(value: Credits) -> Self {
        value.0
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A university course.
///
/// The only required field is the code, which must be unique within a
/// [`ScraperResult`](super::ScraperResult).
///
/// # Ordering
///
/// Courses order by sort key, then code, then every remaining field:
/// `(sort_key, code, name, description, schedule, instructors,
/// num_credits, enrollment_status, num_seats_filled, num_seats_total,
/// waitlist_length, mutual_exclusion_key)`. A course without a sort key
/// sorts before any course with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "CourseWire", into = "CourseWire")]
pub struct Course {
    sort_key: Option<Key>,
    code: String,
    name: Option<String>,
    description: Option<String>,
    schedule: Schedule,
    instructors: BTreeSet<String>,
    num_credits: Option<Credits>,
    enrollment_status: Option<String>,
    num_seats_filled: Option<u32>,
    num_seats_total: Option<u32>,
    waitlist_length: Option<u32>,
    mutual_exclusion_key: Option<Key>,
}

impl Course {
    /// Start assembling a new course.
    pub fn builder() -> CourseBuilder {
        CourseBuilder::default()
    }

    /// Reopen this course for editing, e.g. to refine it.
    pub fn to_builder(&self) -> CourseBuilder {
        CourseBuilder {
            code: Some(self.code.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            instructors: self.instructors.clone(),
            num_credits: self.num_credits,
            enrollment_status: self.enrollment_status.clone(),
            num_seats_filled: self.num_seats_filled,
            num_seats_total: self.num_seats_total,
            waitlist_length: self.waitlist_length,
            sort_key: self.sort_key.clone(),
            mutual_exclusion_key: self.mutual_exclusion_key.clone(),
        }
    }

    /// Add an instructor. Returns `false` (with a warning) for a duplicate.
    pub fn add_instructor(&mut self, instructor: impl Into<String>) -> bool {
        insert_instructor(&mut self.instructors, instructor.into())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Instructor names in sorted order.
    pub fn instructors(&self) -> impl Iterator<Item = &str> {
        self.instructors.iter().map(String::as_str)
    }

    pub fn num_credits(&self) -> Option<f64> {
        self.num_credits.map(Credits::value)
    }

    pub fn enrollment_status(&self) -> Option<&str> {
        self.enrollment_status.as_deref()
    }

    pub fn num_seats_filled(&self) -> Option<u32> {
        self.num_seats_filled
    }

    pub fn num_seats_total(&self) -> Option<u32> {
        self.num_seats_total
    }

    pub fn waitlist_length(&self) -> Option<u32> {
        self.waitlist_length
    }

    pub fn sort_key(&self) -> Option<&Key> {
        self.sort_key.as_ref()
    }

    /// Courses sharing a mutual-exclusion key cannot both be taken.
    pub fn mutual_exclusion_key(&self) -> Option<&Key> {
        self.mutual_exclusion_key.as_ref()
    }

    /// True if both courses carry the same mutual-exclusion key.
    pub fn excludes(&self, other: &Course) -> bool {
        matches!(
            (&self.mutual_exclusion_key, &other.mutual_exclusion_key),
            (Some(a), Some(b)) if a == b
        )
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

fn insert_instructor(instructors: &mut BTreeSet<String>, instructor: String) -> bool {
    if instructors.contains(&instructor) {
        warn!(%instructor, "got same instructor more than once");
        return false;
    }
    instructors.insert(instructor)
}

fn seat_count(field: &'static str, value: i64) -> Result<u32, MaintainerError> {
    if value < 0 {
        return Err(MaintainerError::invalid(field, value, "must be nonnegative"));
    }
    u32::try_from(value).map_err(|_| MaintainerError::invalid(field, value, "too large"))
}

/// Mutable builder for a [`Course`].
///
/// Setters validate before mutating; a failed call leaves the builder
/// untouched.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::{Course, Key};
///
/// let mut builder = Course::builder();
/// builder
///     .set_code("CS 101 PO-01")
///     .unwrap()
///     .set_name("Introduction to Computer Science")
///     .set_instructors(["Grace Hopper"])
///     .set_num_credits(1.0)
///     .unwrap()
///     .set_sort_key(Key::from_iter(["CS", "101"]));
/// let course = builder.build().unwrap();
///
/// assert_eq!(course.code(), "CS 101 PO-01");
/// assert!(builder.set_num_seats_total(-3).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseBuilder {
    code: Option<String>,
    name: Option<String>,
    description: Option<String>,
    schedule: Schedule,
    instructors: BTreeSet<String>,
    num_credits: Option<Credits>,
    enrollment_status: Option<String>,
    num_seats_filled: Option<u32>,
    num_seats_total: Option<u32>,
    waitlist_length: Option<u32>,
    sort_key: Option<Key>,
    mutual_exclusion_key: Option<Key>,
}

impl CourseBuilder {
    /// Set the unique course code. Must not be blank.
    pub fn set_code(&mut self, code: impl Into<String>) -> Result<&mut Self, MaintainerError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(MaintainerError::Empty("code"));
        }
        self.code = Some(code);
        Ok(self)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_schedule(&mut self, schedule: Schedule) -> &mut Self {
        self.schedule = schedule;
        self
    }

    /// Replace the instructors. Duplicates are dropped with a warning.
    pub fn set_instructors<I, S>(&mut self, instructors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for instructor in instructors {
            insert_instructor(&mut set, instructor.into());
        }
        self.instructors = set;
        self
    }

    /// Add one instructor. Returns `false` (with a warning) for a duplicate.
    pub fn add_instructor(&mut self, instructor: impl Into<String>) -> bool {
        insert_instructor(&mut self.instructors, instructor.into())
    }

    pub fn set_num_credits(&mut self, credits: f64) -> Result<&mut Self, MaintainerError> {
        self.num_credits = Some(Credits::new(credits)?);
        Ok(self)
    }

    pub fn set_enrollment_status(&mut self, status: impl Into<String>) -> &mut Self {
        self.enrollment_status = Some(status.into());
        self
    }

    pub fn set_num_seats_filled(&mut self, filled: i64) -> Result<&mut Self, MaintainerError> {
        self.num_seats_filled = Some(seat_count("num_seats_filled", filled)?);
        Ok(self)
    }

    pub fn set_num_seats_total(&mut self, total: i64) -> Result<&mut Self, MaintainerError> {
        self.num_seats_total = Some(seat_count("num_seats_total", total)?);
        Ok(self)
    }

    pub fn set_waitlist_length(&mut self, length: i64) -> Result<&mut Self, MaintainerError> {
        self.waitlist_length = Some(seat_count("waitlist_length", length)?);
        Ok(self)
    }

    pub fn set_sort_key(&mut self, key: Key) -> &mut Self {
        self.sort_key = Some(key);
        self
    }

    pub fn set_mutual_exclusion_key(&mut self, key: Key) -> &mut Self {
        self.mutual_exclusion_key = Some(key);
        self
    }

    /// Check the course has a code and produce it.
    pub fn build(&self) -> Result<Course, MaintainerError> {
        let code = self.code.clone().ok_or(MaintainerError::Missing("code"))?;
        Ok(Course {
            sort_key: self.sort_key.clone(),
            code,
            name: self.name.clone(),
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            instructors: self.instructors.clone(),
            num_credits: self.num_credits,
            enrollment_status: self.enrollment_status.clone(),
            num_seats_filled: self.num_seats_filled,
            num_seats_total: self.num_seats_total,
            waitlist_length: self.waitlist_length,
            mutual_exclusion_key: self.mutual_exclusion_key.clone(),
        })
    }
}

/// Wire representation of a [`Course`].
#[derive(Serialize, Deserialize)]
struct CourseWire {
    #[serde(rename = "courseCode")]
    code: String,
    #[serde(rename = "courseName", default)]
    name: Option<String>,
    #[serde(rename = "courseDescription", default)]
    description: Option<String>,
    #[serde(rename = "courseSchedule", default)]
    schedule: Option<Schedule>,
    #[serde(rename = "courseInstructors", default)]
    instructors: Option<Vec<String>>,
    #[serde(rename = "courseCredits", default)]
    num_credits: Option<f64>,
    #[serde(rename = "courseEnrollmentStatus", default)]
    enrollment_status: Option<String>,
    #[serde(rename = "courseSeatsFilled", default)]
    num_seats_filled: Option<i64>,
    #[serde(rename = "courseSeatsTotal", default)]
    num_seats_total: Option<i64>,
    #[serde(rename = "courseWaitlistLength", default)]
    waitlist_length: Option<i64>,
    #[serde(rename = "courseSortKey", default)]
    sort_key: Option<Key>,
    #[serde(rename = "courseMutualExclusionKey", default)]
    mutual_exclusion_key: Option<Key>,
}

impl TryFrom<CourseWire> for Course {
    type Error = MaintainerError;

    fn try_from(wire: CourseWire) -> Result<Self, Self::Error> {
        let mut b = Course::builder();
        b.set_code(wire.code)?;
        if let Some(name) = wire.name {
            b.set_name(name);
        }
        if let Some(description) = wire.description {
            b.set_description(description);
        }
        if let Some(schedule) = wire.schedule {
            b.set_schedule(schedule);
        }
        if let Some(instructors) = wire.instructors {
            b.set_instructors(instructors);
        }
        if let Some(credits) = wire.num_credits {
            b.set_num_credits(credits)?;
        }
        if let Some(status) = wire.enrollment_status {
            b.set_enrollment_status(status);
        }
        if let Some(filled) = wire.num_seats_filled {
            b.set_num_seats_filled(filled)?;
        }
        if let Some(total) = wire.num_seats_total {
            b.set_num_seats_total(total)?;
        }
        if let Some(length) = wire.waitlist_length {
            b.set_waitlist_length(length)?;
        }
        if let Some(key) = wire.sort_key {
            b.set_sort_key(key);
        }
        if let Some(key) = wire.mutual_exclusion_key {
            b.set_mutual_exclusion_key(key);
        }
        b.build()
    }
}

impl From<Course> for CourseWire {
    fn from(course: Course) -> Self {
        CourseWire {
            code: course.code,
            name: course.name,
            description: course.description,
            schedule: Some(course.schedule),
            instructors: Some(course.instructors.into_iter().collect()),
            num_credits: course.num_credits.map(Credits::value),
            enrollment_status: course.enrollment_status,
            num_seats_filled: course.num_seats_filled.map(i64::from),
            num_seats_total: course.num_seats_total.map(i64::from),
            waitlist_length: course.waitlist_length.map(i64::from),
            sort_key: course.sort_key,
            mutual_exclusion_key: course.mutual_exclusion_key,
        }
    }
}
