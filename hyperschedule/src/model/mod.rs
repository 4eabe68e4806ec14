//! Data model for scraped course data.
//!
//! Scrapers build these values and hand them to Hyperschedule in a
//! [`ScraperResult`]. All types enforce their invariants at construction
//! time, and all of them serialize to the JSON wire format read by the
//! frontend.

mod course;
mod date;
mod error;
mod key;
mod result;
mod schedule;
mod session;
mod subterm;
mod term;
mod time;
mod weekdays;


pub use course::{Course, CourseBuilder, Credits};
pub use date::Date;
pub use error::MaintainerError;
pub use key::{Finite, Key, KeyValue};
pub use result::ScraperResult;
pub use schedule::Schedule;
pub use session::{Session, SessionBuilder};
pub use subterm::Subterm;
pub use term::Term;
pub use time::Time;
pub use weekdays::{Day, Weekdays};
