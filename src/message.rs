// File: ./src/message.rs
// Reference date of a schedule, taken from the message it was sent in.
use crate::error::ScheduleError;
use chrono::{DateTime, NaiveDate};

/// Date of an RFC 2822 `Date:` header value, as written by the sender.
///
/// `Tue, 26 Dec 2023 16:02:11 -0800` gives 2023-12-26. Headers that are not
/// strictly RFC 2822 still work as long as the day, month and year follow the
/// weekday.
pub fn reference_date_from_header(value: &str) -> Result<NaiveDate, ScheduleError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.date_naive());
    }

    let parts: Vec<&str> = value.split_whitespace().skip(1).take(3).collect();
    if parts.len() == 3
        && let Ok(date) = NaiveDate::parse_from_str(&parts.join(" "), "%d %b %Y")
    {
        return Ok(date);
    }

    Err(ScheduleError::InvalidMessageDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2822_header() {
        assert_eq!(
            reference_date_from_header("Tue, 26 Dec 2023 16:02:11 -0800").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 26).unwrap()
        );
    }

    #[test]
    fn test_sender_date_not_utc() {
        // 23:30 in Vancouver is already the next day in UTC.
        assert_eq!(
            reference_date_from_header("Sat, 30 Dec 2023 23:30:00 -0800").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 30).unwrap()
        );
    }

    #[test]
    fn test_loose_header() {
        assert_eq!(
            reference_date_from_header("Thu, 28 Dec 2023 09:15:00 PST (Pacific Standard Time)")
                .unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 28).unwrap()
        );
    }

    #[test]
    fn test_garbage_header() {
        assert!(matches!(
            reference_date_from_header("yesterday"),
            Err(ScheduleError::InvalidMessageDate(_))
        ));
    }
}
