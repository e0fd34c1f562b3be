use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::errors::ValidationError;

/// Default timezone for valuation dates.
/// Stored timestamps are UTC instants, so UTC keeps trade dates as written.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to a valuation date in the given timezone.
///
/// This is the single source of truth for converting instants to domain dates.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the given valuation timezone.
pub fn valuation_date_today(tz: Tz) -> NaiveDate {
    valuation_date_from_utc(Utc::now(), tz)
}

/// Parses a stored timestamp.
///
/// Accepts RFC 3339 (`2024-03-15T14:30:00+00:00`), a naive ISO-8601
/// date-time read as UTC (`2024-03-15T14:30:00.123456`), or a bare date
/// read as midnight UTC (`2024-03-15`).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
                return Ok(naive.and_utc());
            }
            if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                return Ok(date.and_time(NaiveTime::MIN).and_utc());
            }
            Err(ValidationError::DateTimeParse(rfc_err))
        }
    }
}

/// Parses a timezone name such as `UTC` or `Europe/Madrid`.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Every calendar year touched by `[start, end]`, ascending.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> Vec<i32> {
    if start > end {
        return Vec::new();
    }
    (start.year()..=end.year()).collect()
}
