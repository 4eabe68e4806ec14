//! Scraper error types.

use std::path::PathBuf;

use crate::model::MaintainerError;

/// Errors a scraper can report from `run` or `refine`.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The scraper produced data the model rejects
    #[error("invalid course data: {0}")]
    Model(#[from] MaintainerError),

    /// Reading saved data failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Saved data is not valid JSON for a scraper result
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream course database misbehaved
    #[error("scrape failed: {0}")]
    Source(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScrapeError::from(MaintainerError::Missing("code"));
        assert_eq!(err.to_string(), "invalid course data: code is required");

        let err = ScrapeError::Io {
            path: PathBuf::from("/tmp/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read /tmp/missing.json: not found");

        let err = ScrapeError::Source("HTTP 503".into());
        assert_eq!(err.to_string(), "scrape failed: HTTP 503");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(ScrapeError::from(json_err).to_string().starts_with("JSON parse error"));
    }
}
