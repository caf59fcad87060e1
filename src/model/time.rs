// File: src/model/time.rs
use crate::error::ScheduleError;
use chrono::{Datelike, Days, NaiveDate, NaiveTime};

/// Parses a 12-hour time token such as `9AM`, `9 AM`, `9:00 AM` or `10:30PM`.
///
/// Whitespace is ignored, the meridiem marker is case-insensitive. Tokens that
/// do not have one of the hour-only or hour:minute shapes are rejected rather
/// than guessed at.
pub fn parse_time_token(token: &str) -> Result<NaiveTime, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeToken(token.to_string());

    let compact: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    // "9am" / "10am" or "9:00am" / "10:00am"
    if !matches!(compact.len(), 3 | 4 | 6 | 7) {
        return Err(invalid());
    }

    let (clock, is_pm) = if let Some(stripped) = compact.strip_suffix("am") {
        (stripped, false)
    } else if let Some(stripped) = compact.strip_suffix("pm") {
        (stripped, true)
    } else {
        return Err(invalid());
    };

    let (h, m) = match clock.split_once(':') {
        Some((h_str, m_str)) if m_str.len() == 2 => (
            h_str.parse::<u32>().map_err(|_| invalid())?,
            m_str.parse::<u32>().map_err(|_| invalid())?,
        ),
        Some(_) => return Err(invalid()),
        None => (clock.parse::<u32>().map_err(|_| invalid())?, 0),
    };
    if !(1..=12).contains(&h) || m > 59 {
        return Err(invalid());
    }

    let h_24 = if h == 12 {
        if is_pm { 12 } else { 0 }
    } else if is_pm {
        h + 12
    } else {
        h
    };
    NaiveTime::from_hms_opt(h_24, m, 0).ok_or_else(invalid)
}

/// Resolves a header token like `Mon Jan 3` to a full date.
///
/// The year comes from `reference`. When the date lands more than
/// `lookback_days` before the reference, or does not exist in that year
/// (Feb 29), it belongs to the following year. This covers schedules sent in
/// late December for January weeks.
pub fn resolve_date_token(
    token: &str,
    reference: NaiveDate,
    lookback_days: u32,
) -> Result<NaiveDate, ScheduleError> {
    let invalid = || ScheduleError::InvalidDateToken(token.to_string());

    // Weekday is redundant, only month and day matter.
    let parts: Vec<&str> = token.split_whitespace().skip(1).take(2).collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    let in_year = |year: i32| {
        NaiveDate::parse_from_str(&format!("{} {} {}", parts[0], parts[1], year), "%b %d %Y").ok()
    };

    // No cutoff when the window reaches past the start of the calendar.
    let cutoff = reference.checked_sub_days(Days::new(lookback_days.into()));
    match in_year(reference.year()) {
        Some(date) if !cutoff.is_some_and(|c| date < c) => Ok(date),
        _ => in_year(reference.year() + 1).ok_or_else(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_hour_only_forms() {
        assert_eq!(parse_time_token("9AM").unwrap(), t(9, 0));
        assert_eq!(parse_time_token("9 AM").unwrap(), t(9, 0));
        assert_eq!(parse_time_token("10PM").unwrap(), t(22, 0));
        assert_eq!(parse_time_token("10 pm").unwrap(), t(22, 0));
    }

    #[test]
    fn test_hour_minute_forms() {
        assert_eq!(parse_time_token("9:30 AM").unwrap(), t(9, 30));
        assert_eq!(parse_time_token("9:30AM").unwrap(), t(9, 30));
        assert_eq!(parse_time_token("11:45 PM").unwrap(), t(23, 45));
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(parse_time_token("12 PM").unwrap(), t(12, 0));
        assert_eq!(parse_time_token("12:00 AM").unwrap(), t(0, 0));
    }

    #[test]
    fn test_malformed_time_tokens() {
        for bad in ["", "9", "13PM", "9:60 AM", "09:000 AM", "noon", "9:5 AM", "17:00"] {
            assert!(
                matches!(parse_time_token(bad), Err(ScheduleError::InvalidTimeToken(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_year_rollover() {
        let reference = d(2023, 12, 30);
        assert_eq!(
            resolve_date_token("Mon Jan 3", reference, 14).unwrap(),
            d(2024, 1, 3)
        );
        assert_eq!(
            resolve_date_token("Mon Dec 27", reference, 14).unwrap(),
            d(2023, 12, 27)
        );
    }

    #[test]
    fn test_strict_rollover_without_lookback() {
        let reference = d(2023, 12, 30);
        assert_eq!(
            resolve_date_token("Sat Dec 30", reference, 0).unwrap(),
            d(2023, 12, 30)
        );
        assert_eq!(
            resolve_date_token("Fri Dec 29", reference, 0).unwrap(),
            d(2024, 12, 29)
        );
    }

    #[test]
    fn test_leap_day_in_next_year() {
        assert_eq!(
            resolve_date_token("Thu Feb 29", d(2023, 12, 28), 14).unwrap(),
            d(2024, 2, 29)
        );
        assert!(resolve_date_token("Fri Feb 29", d(2024, 12, 28), 14).is_err());
    }

    #[test]
    fn test_huge_lookback_never_rolls_over() {
        assert_eq!(
            resolve_date_token("Mon Jan 3", d(2023, 12, 30), u32::MAX).unwrap(),
            d(2023, 1, 3)
        );
    }

    #[test]
    fn test_invalid_date_token() {
        let reference = d(2023, 12, 30);
        assert!(resolve_date_token("Total", reference, 14).is_err());
        assert!(resolve_date_token("Mon Foo 3", reference, 14).is_err());
    }
}
