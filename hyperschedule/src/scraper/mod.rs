//! The interface between Hyperschedule and course scrapers.
//!
//! A scraper knows how to pull one school's course data and turn it into a
//! [`ScraperResult`]. Some course databases only list summaries in bulk, so a
//! scraper may also be able to refine a single course with extra detail.

mod error;
mod file;

pub use error::ScrapeError;
pub use file::FileScraper;

use tracing::debug;

use crate::model::{Course, MaintainerError, ScraperResult};

/// Trait implemented by each school's scraper.
///
/// This abstraction allows the rest of the system to be tested with saved
/// data instead of live course databases.
pub trait Scraper {
    /// Scrape the current term's course data.
    fn run(&self) -> Result<ScraperResult, ScrapeError>;

    /// Fetch extra detail for one course.
    ///
    /// Returns `Ok(None)` when the course is already as good as it gets. A
    /// refined course must keep the original course code.
    fn refine(&self, course: &Course) -> Result<Option<Course>, ScrapeError> {
        let _ = course;
        Ok(None)
    }

    /// Whether [`refine`](Self::refine) does anything for this scraper.
    fn supports_refine(&self) -> bool {
        false
    }
}

/// Refine the course `code` in `result` in place.
///
/// Returns `true` if the course was replaced by a refined version. Scrapers
/// that do not support refinement leave the result untouched.
pub fn refine_course<S>(
    scraper: &S,
    result: &mut ScraperResult,
    code: &str,
) -> Result<bool, ScrapeError>
where
    S: Scraper + ?Sized,
{
    if !scraper.supports_refine() {
        return Ok(false);
    }

    let course = result.course(code).ok_or_else(|| MaintainerError::Mismatch {
        field: "course code",
        expected: "an existing course".to_owned(),
        actual: code.to_owned(),
    })?;

    let Some(refined) = scraper.refine(course)? else {
        debug!(code, "refine returned no changes");
        return Ok(false);
    };

    if refined.code() != code {
        return Err(MaintainerError::Mismatch {
            field: "course code",
            expected: code.to_owned(),
            actual: refined.code().to_owned(),
        }
        .into());
    }

    result.replace_course(refined)?;
    debug!(code, "refined course");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Key, Term};

    fn term() -> Term {
        Term::new("2024FA", "Fall 2024", Key::from_iter([2024i64, 1])).unwrap()
    }

    fn course(code: &str, name: &str) -> Course {
        let mut b = Course::builder();
        b.set_code(code).unwrap().set_name(name);
        b.build().unwrap()
    }

    /// Scraper that serves fixed data and appends a description on refine.
    struct StaticScraper {
        courses: Vec<Course>,
        refine_to: Option<&'static str>,
    }

    impl Scraper for StaticScraper {
        fn run(&self) -> Result<ScraperResult, ScrapeError> {
            Ok(ScraperResult::with_courses(term(), self.courses.clone()))
        }

        fn refine(&self, course: &Course) -> Result<Option<Course>, ScrapeError> {
            let Some(code) = self.refine_to else {
                return Ok(None);
            };
            let mut b = course.to_builder();
            b.set_code(code)?.set_description("Now with detail.");
            Ok(Some(b.build()?))
        }

        fn supports_refine(&self) -> bool {
            true
        }
    }

    struct FailingScraper;

    impl Scraper for FailingScraper {
        fn run(&self) -> Result<ScraperResult, ScrapeError> {
            Err(ScrapeError::Source("portal is down".into()))
        }
    }

    #[test]
    fn default_refine_is_a_no_op() {
        assert!(!FailingScraper.supports_refine());
        assert_eq!(FailingScraper.refine(&course("CS101", "Intro")).unwrap(), None);
        assert!(matches!(FailingScraper.run(), Err(ScrapeError::Source(_))));
    }

    #[test]
    fn unsupported_refine_leaves_result_alone() {
        let mut result = ScraperResult::with_courses(term(), [course("CS101", "Intro")]);
        let before = result.clone();
        assert!(!refine_course(&FailingScraper, &mut result, "CS101").unwrap());
        assert_eq!(result, before);
    }

    #[test]
    fn refine_replaces_course() {
        let scraper = StaticScraper {
            courses: vec![course("CS101", "Intro"), course("CS102", "Data")],
            refine_to: Some("CS101"),
        };
        let mut result = scraper.run().unwrap();
        assert!(refine_course(&scraper, &mut result, "CS101").unwrap());

        let refined = result.course("CS101").unwrap();
        assert_eq!(refined.description(), Some("Now with detail."));
        assert_eq!(refined.name(), Some("Intro"));
        assert_eq!(result.course("CS102").unwrap().description(), None);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn refine_returning_none_keeps_course() {
        let scraper = StaticScraper {
            courses: vec![course("CS101", "Intro")],
            refine_to: None,
        };
        let mut result = scraper.run().unwrap();
        assert!(!refine_course(&scraper, &mut result, "CS101").unwrap());
        assert_eq!(result.course("CS101").unwrap().description(), None);
    }

    #[test]
    fn refine_must_keep_code() {
        let scraper = StaticScraper {
            courses: vec![course("CS101", "Intro")],
            refine_to: Some("CS999"),
        };
        let mut result = scraper.run().unwrap();
        let err = refine_course(&scraper, &mut result, "CS101").unwrap_err();
        assert!(matches!(err, ScrapeError::Model(MaintainerError::Mismatch { .. })));
        assert!(result.course("CS999").is_none());
    }

    #[test]
    fn refine_unknown_code_fails() {
        let scraper = StaticScraper {
            courses: vec![],
            refine_to: Some("CS101"),
        };
        let mut result = scraper.run().unwrap();
        assert!(refine_course(&scraper, &mut result, "CS101").is_err());
    }

    #[test]
    fn works_through_trait_object() {
        let scraper: Box<dyn Scraper> = Box::new(StaticScraper {
            courses: vec![course("CS101", "Intro")],
            refine_to: Some("CS101"),
        });
        let mut result = scraper.run().unwrap();
        assert!(refine_course(scraper.as_ref(), &mut result, "CS101").unwrap());
    }
}
