//! Timestamp parsing and the venue's logical day.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Format used when a timestamp is written back to the store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A venue day runs 09:00 → 09:00.
pub const LOGICAL_DAY_OFFSET_HOURS: i64 = 9;

const ACCEPTED_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Date given to records whose timestamp cannot be read.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Sort key for unreadable timestamps: they come first.
pub fn sentinel_timestamp() -> NaiveDateTime {
    NaiveDateTime::new(sentinel_date(), NaiveTime::MIN)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a stored timestamp. A bare date is read as midnight.
pub fn parse_timestamp(raw: &str) -> AppResult<NaiveDateTime> {
    let s = raw.trim();

    for fmt in ACCEPTED_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    if let Some(d) = parse_date(s) {
        return Ok(NaiveDateTime::new(d, NaiveTime::MIN));
    }

    Err(AppError::Parse(format!("timestamp '{raw}'")))
}

/// Timestamps too close to the calendar's lower end fall on the sentinel.
pub fn logical_date(at: NaiveDateTime) -> NaiveDate {
    at.checked_sub_signed(TimeDelta::hours(LOGICAL_DAY_OFFSET_HOURS))
        .map_or_else(sentinel_date, |shifted| shifted.date())
}

/// Logical date of a raw timestamp, or the sentinel when it does not parse.
pub fn logical_date_of(raw: &str) -> NaiveDate {
    parse_timestamp(raw)
        .map(logical_date)
        .unwrap_or_else(|_| sentinel_date())
}
