// Crate root library declaration and module exports.
//! Turns the weekly schedule tables of an emailed HTML body into per-employee
//! shift records and iCalendar files.
//!
//! ```no_run
//! use horaire::{Config, ScheduleDocument, extract_schedules, serialize_to_calendar};
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let html = std::fs::read_to_string("schedule.html")?;
//! let reference = horaire::message::reference_date_from_header("Thu, 28 Dec 2023 09:15:00 -0800")?;
//!
//! let mut doc = ScheduleDocument::parse(&html)?;
//! horaire::sanitize(&mut doc);
//! for block in extract_schedules(&doc, reference, &config.scan_options())? {
//!     for (name, workdays) in &block.employees {
//!         let ics = serialize_to_calendar(&horaire::model::slugify(name), workdays, &config);
//!         println!("{}", String::from_utf8_lossy(&ics));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
pub mod calendar;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod message;
pub mod model;
pub mod schedule;
pub mod storage;
pub mod table;

pub use calendar::{CalendarSerializer, serialize_to_calendar};
pub use config::Config;
pub use error::ScheduleError;
pub use model::WorkdayRecord;
pub use schedule::{ScanOptions, ScheduleBlock, extract_schedules};
pub use table::{ScheduleDocument, sanitize};
