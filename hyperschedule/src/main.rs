use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, error, info};

use hyperschedule::config::Config;
use hyperschedule::logging;
use hyperschedule::model::ScraperResult;
use hyperschedule::scraper::{FileScraper, ScrapeError, Scraper};

/// Load a scraper result from `path`, or stdin when no path is given.
fn load(path: Option<PathBuf>) -> Result<ScraperResult, ScrapeError> {
    match path {
        Some(path) => FileScraper::new(path).run(),
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|source| ScrapeError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(serde_json::from_str(&json)?)
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config);
    debug!(?config, "starting");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let result = match load(path) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "could not load scraper result");
            return ExitCode::FAILURE;
        }
    };

    let sessions: usize = result.courses().iter().map(|c| c.schedule().len()).sum();
    info!(term = %result.term(), courses = result.len(), sessions, "validated scraper result");

    let json = if config.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "could not serialize scraper result");
            ExitCode::FAILURE
        }
    }
}
