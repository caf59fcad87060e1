// File: src/model/workday.rs
use crate::error::ScheduleError;
use crate::model::time::parse_time_token;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// A single shift of one employee.
///
/// `end` is always after `start`. `lunch`, when present, is on the calendar
/// date of `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdayRecord {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub lunch: Option<DateTime<Tz>>,
}

fn localize(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>, ScheduleError> {
    let naive = date.and_time(time);
    // Ambiguous wall-clock times (DST fall-back) resolve to the first occurrence.
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or(ScheduleError::NonexistentLocalTime(naive, *tz))
}

/// Turns a canonical shift token (`start|end` or `start|end|lunch`) into a
/// `WorkdayRecord` on `date`.
///
/// An end at or before the start is an overnight shift and moves to the next
/// day. Lunch never crosses midnight.
pub fn build_workday(token: &str, date: NaiveDate, tz: &Tz) -> Result<WorkdayRecord, ScheduleError> {
    let tokens: Vec<&str> = token.split('|').map(str::trim).collect();
    if !(2..=3).contains(&tokens.len()) {
        return Err(ScheduleError::InvalidShiftFormat(token.to_string()));
    }

    let start_time = parse_time_token(tokens[0])?;
    let end_time = parse_time_token(tokens[1])?;

    let start = localize(tz, date, start_time)?;
    let mut end = localize(tz, date, end_time)?;
    if end <= start {
        let next_day = date
            .succ_opt()
            .ok_or_else(|| ScheduleError::InvalidShiftFormat(token.to_string()))?;
        end = localize(tz, next_day, end_time)?;
    }
    if end <= start {
        return Err(ScheduleError::InvalidShiftFormat(token.to_string()));
    }

    let lunch = match tokens.get(2) {
        Some(lunch_token) => Some(localize(tz, date, parse_time_token(lunch_token)?)?),
        None => None,
    };

    Ok(WorkdayRecord { start, end, lunch })
}
