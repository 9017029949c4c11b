//! Parse --period / --range (year / month / day / interval).

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Inclusive bounds on the logical date.
pub type DateBounds = (NaiveDate, NaiveDate);

/// Supported:
/// - `all` (no bounds)
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - YYYY:YYYY, YYYY-MM:YYYY-MM, YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<Option<DateBounds>> {
    let p = p.trim();

    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let bounds = if let Some((start_raw, end_raw)) = p.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{p}: start and end must have same format"
            )));
        }
        (single(start)?.0, single(end)?.1)
    } else {
        single(p)?
    };

    if bounds.0 > bounds.1 {
        return Err(AppError::InvalidDate(format!("{p}: start is after end")));
    }

    Ok(Some(bounds))
}

pub fn parse_optional_period(p: Option<&str>) -> AppResult<Option<DateBounds>> {
    match p {
        Some(p) => parse_period(p),
        None => Ok(None),
    }
}

pub fn contains(bounds: &Option<DateBounds>, d: NaiveDate) -> bool {
    match bounds {
        Some((start, end)) => *start <= d && d <= *end,
        None => true,
    }
}

fn single(s: &str) -> AppResult<DateBounds> {
    let invalid = || AppError::InvalidDate(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let d2 = month_last_day(d1).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
}
