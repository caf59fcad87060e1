// File: ./src/model/mod.rs
pub mod cell;
pub mod slug;
pub mod time;
pub mod workday;

pub use cell::{Cell, normalize_cell};
pub use slug::slugify;
pub use time::{parse_time_token, resolve_date_token};
pub use workday::{WorkdayRecord, build_workday};
