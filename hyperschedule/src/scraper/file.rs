//! Scraper that serves saved results from JSON files.
//!
//! Useful for replaying a previous scrape and for testing consumers without
//! touching a live course database.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::{Course, ScraperResult};

use super::{ScrapeError, Scraper};

/// Scraper backed by a saved [`ScraperResult`] file.
///
/// Refinement is optional: with a refinement directory set, refining course
/// `CODE` loads `{CODE}.json` from that directory (path separators in the
/// code become `_`). Missing files mean "nothing to refine".
#[derive(Debug, Clone)]
pub struct FileScraper {
    path: PathBuf,
    refinements: Option<PathBuf>,
}

impl FileScraper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            refinements: None,
        }
    }

    /// Serve refined courses from `dir`.
    pub fn with_refinements(mut self, dir: impl Into<PathBuf>) -> Self {
        self.refinements = Some(dir.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn refinement_path(dir: &Path, code: &str) -> PathBuf {
        let stem: String = code
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();
        dir.join(format!("{stem}.json"))
    }
}

fn read(path: &Path) -> Result<String, ScrapeError> {
    std::fs::read_to_string(path).map_err(|source| ScrapeError::Io {
        path: path.to_owned(),
        source,
    })
}

impl Scraper for FileScraper {
    fn run(&self) -> Result<ScraperResult, ScrapeError> {
        let json = read(&self.path)?;
        let result: ScraperResult = serde_json::from_str(&json)?;
        debug!(path = %self.path.display(), courses = result.len(), "loaded saved result");
        Ok(result)
    }

    fn refine(&self, course: &Course) -> Result<Option<Course>, ScrapeError> {
        let Some(dir) = &self.refinements else {
            return Ok(None);
        };
        let path = Self::refinement_path(dir, course.code());
        if !path.is_file() {
            return Ok(None);
        }
        let refined: Course = serde_json::from_str(&read(&path)?)?;
        Ok(Some(refined))
    }

    fn supports_refine(&self) -> bool {
        self.refinements.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::refine_course;
    use serde_json::json;

    fn saved_result() -> serde_json::Value {
        json!({
            "term": { "termCode": "2024FA", "termName": "Fall 2024", "termSortKey": [2024, 1] },
            "courses": {
                "CS101": {
                    "courseCode": "CS101",
                    "courseName": "Intro",
                    "courseSchedule": [{
                        "scheduleWeekdays": "MWF",
                        "scheduleStartTime": "09:00",
                        "scheduleEndTime": "09:50",
                    }],
                },
                "CS 5/6": { "courseCode": "CS 5/6" },
            },
        })
    }

    fn write(path: &Path, value: &serde_json::Value) {
        std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
    }

    #[test]
    fn loads_saved_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write(&path, &saved_result());

        let scraper = FileScraper::new(&path);
        assert_eq!(scraper.path(), path);
        assert!(!scraper.supports_refine());

        let result = scraper.run().unwrap();
        assert_eq!(result.term().code(), "2024FA");
        assert_eq!(result.len(), 2);
        assert_eq!(result.course("CS101").unwrap().schedule().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileScraper::new(dir.path().join("nope.json")).run().unwrap_err();
        assert!(matches!(err, ScrapeError::Io { .. }));
    }

    #[test]
    fn invalid_data_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let mut bad = saved_result();
        bad["courses"]["CS101"]["courseSchedule"][0]["scheduleWeekdays"] = json!("XYZ");
        write(&path, &bad);

        let err = FileScraper::new(&path).run().unwrap_err();
        assert!(matches!(err, ScrapeError::Json(_)));
    }

    #[test]
    fn refines_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write(&path, &saved_result());
        let refined_dir = dir.path().join("refined");
        std::fs::create_dir(&refined_dir).unwrap();
        write(
            &refined_dir.join("CS 5_6.json"),
            &json!({ "courseCode": "CS 5/6", "courseDescription": "Detailed." }),
        );

        let scraper = FileScraper::new(&path).with_refinements(&refined_dir);
        assert!(scraper.supports_refine());

        let mut result = scraper.run().unwrap();
        assert!(refine_course(&scraper, &mut result, "CS 5/6").unwrap());
        assert_eq!(result.course("CS 5/6").unwrap().description(), Some("Detailed."));

        // No file for CS101: nothing changes.
        assert!(!refine_course(&scraper, &mut result, "CS101").unwrap());
        assert_eq!(result.course("CS101").unwrap().name(), Some("Intro"));
    }
}
