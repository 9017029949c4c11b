pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod fees;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod ranking;

use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::utils::date;
use chrono::{NaiveDate, NaiveDateTime};

/// `--date`, or the current logical day.
pub(crate) fn day_or_today(raw: Option<&str>) -> AppResult<NaiveDate> {
    match raw {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(date::logical_date(date::now())),
    }
}

pub(crate) fn parse_at(raw: Option<&str>) -> AppResult<Option<NaiveDateTime>> {
    raw.map(date::parse_timestamp).transpose()
}

/// `X(A)1 Y(B)2 Z(C)3`
pub(crate) fn describe_seats(r: &Record) -> String {
    r.seats
        .iter()
        .map(|s| format!("{}({}){}", s.name, s.category, s.rank))
        .collect::<Vec<_>>()
        .join(" ")
}
