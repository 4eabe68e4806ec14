//! The output of a scraper run.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Course, MaintainerError, Term};

/// Everything a scraper produced: one term plus its courses, keyed by code.
///
/// Course codes should be distinct. Adding a course whose code is already
/// present replaces the earlier course (last write wins) and logs a
/// warning.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::{Course, Key, ScraperResult, Term};
///
/// let term = Term::new("2024FA", "Fall 2024", Key::from_iter([2024i64, 1])).unwrap();
/// let mut result = ScraperResult::new(term);
///
/// let mut course = Course::builder();
/// course.set_code("CS101").unwrap().set_name("Intro");
/// assert!(result.add_course(course.build().unwrap()).is_none());
///
/// course.set_name("Intro to CS");
/// let replaced = result.add_course(course.build().unwrap());
/// assert_eq!(replaced.unwrap().name(), Some("Intro"));
/// assert_eq!(result.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScraperResultWire", into = "ScraperResultWire")]
pub struct ScraperResult {
    term: Term,
    courses: BTreeMap<String, Course>,
}

impl ScraperResult {
    /// Create a result for `term` with no courses.
    pub fn new(term: Term) -> Self {
        Self {
            term,
            courses: BTreeMap::new(),
        }
    }

    /// Create a result for `term` holding `courses`.
    pub fn with_courses(term: Term, courses: impl IntoIterator<Item = Course>) -> Self {
        let mut result = Self::new(term);
        for course in courses {
            result.add_course(course);
        }
        result
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn set_term(&mut self, term: Term) {
        self.term = term;
    }

    /// Add a course, returning any course it replaced.
    pub fn add_course(&mut self, course: Course) -> Option<Course> {
        let code = course.code().to_owned();
        let previous = self.courses.insert(code, course);
        if let Some(prev) = &previous {
            warn!(code = %prev.code(), "multiple courses with same code");
        }
        previous
    }

    /// Swap in a new version of an existing course, returning the old one.
    ///
    /// Unlike [`add_course`](Self::add_course) this is the expected way to
    /// update a course, so it does not warn; it fails if the code is not
    /// already present.
    pub fn replace_course(&mut self, course: Course) -> Result<Course, MaintainerError> {
        match self.courses.get_mut(course.code()) {
            Some(slot) => Ok(std::mem::replace(slot, course)),
            None => Err(MaintainerError::Mismatch {
                field: "course code",
                expected: "an existing course".to_owned(),
                actual: course.code().to_owned(),
            }),
        }
    }

    pub fn remove_course(&mut self, code: &str) -> Option<Course> {
        self.courses.remove(code)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// All courses in display order (by sort key, then code).
    pub fn courses(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.values().collect();
        courses.sort();
        courses
    }

    /// All course codes in lexical order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl fmt::Display for ScraperResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.courses.len() == 1 { "course" } else { "courses" };
        write!(f, "{}: {} {noun}", self.term, self.courses.len())
    }
}

#[derive(Serialize, Deserialize)]
struct ScraperResultWire {
    term: Term,
    #[serde(default)]
    courses: Option<BTreeMap<String, Course>>,
}

impl TryFrom<ScraperResultWire> for ScraperResult {
    type Error = MaintainerError;

    fn try_from(wire: ScraperResultWire) -> Result<Self, Self::Error> {
        let mut result = ScraperResult::new(wire.term);
        for (code, course) in wire.courses.unwrap_or_default() {
            if code != course.code() {
                return Err(MaintainerError::Mismatch {
                    field: "courseCode",
                    expected: code,
                    actual: course.code().to_owned(),
                });
            }
            result.add_course(course);
        }
        Ok(result)
    }
}

impl From<ScraperResult> for ScraperResultWire {
    fn from(result: ScraperResult) -> Self {
        ScraperResultWire {
            term: result.term,
            courses: Some(result.courses),
        }
    }
}
