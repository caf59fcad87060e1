// File: ./src/error.rs
// Error taxonomy for schedule extraction.
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A normalized cell did not split into a start/end pair or a start/end/lunch triplet.
    #[error("invalid shift format: {0:?}")]
    InvalidShiftFormat(String),

    #[error("unrecognized time token: {0:?}")]
    InvalidTimeToken(String),

    #[error("unrecognized date header token: {0:?}")]
    InvalidDateToken(String),

    /// Wall-clock time skipped by a DST transition.
    #[error("local time {0} does not exist in {1}")]
    NonexistentLocalTime(NaiveDateTime, Tz),

    #[error("employee row {0:?} appears before any date header row")]
    EmployeeRowBeforeHeader(String),

    #[error("document must be sanitized before schedules are extracted")]
    Unsanitized,

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("unrecognized message date: {0:?}")]
    InvalidMessageDate(String),
}

impl ScheduleError {
    /// Cell-level errors only cost the offending cell; everything else aborts the scan.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidShiftFormat(_)
                | ScheduleError::InvalidTimeToken(_)
                | ScheduleError::NonexistentLocalTime(..)
        )
    }
}
