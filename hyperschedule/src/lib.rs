//! Course data model for Hyperschedule scrapers.
//!
//! Scrapers pull a school's course catalog and describe it with the types in
//! [`model`], which validate themselves as they are built and serialize to
//! the JSON format the Hyperschedule frontend reads.

pub mod config;
pub mod logging;
pub mod model;
pub mod scraper;
