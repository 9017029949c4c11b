//! Tolerant number reading for values coming from hand-edited sheets.

use crate::errors::{AppError, AppResult};

/// Accepts "2", " 2 ", "2.0" and, like the sheets it reads, truncates "2.7" to 2.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim();

    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }

    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
        _ => None,
    }
}

pub fn parse_rank(raw: &str) -> AppResult<i64> {
    parse_int(raw).ok_or_else(|| AppError::Parse(format!("finish rank '{raw}'")))
}

/// Load-path fallback: dirty legacy ranks read as 0 and match no position.
pub fn rank_or_zero(raw: &str) -> i64 {
    parse_rank(raw).unwrap_or(0)
}

/// Unsigned counter (table / set number); anything unreadable or negative is 0.
pub fn count_or_zero(raw: &str) -> u32 {
    parse_int(raw)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_integer_and_float_text() {
        assert_eq!(parse_rank("1").unwrap(), 1);
        assert_eq!(parse_rank(" 3 ").unwrap(), 3);
        assert_eq!(parse_rank("2.0").unwrap(), 2);
        assert_eq!(parse_rank("2.7").unwrap(), 2);
    }

    #[test]
    fn garbage_is_an_error_and_falls_back_to_zero() {
        for raw in ["", "first", "NaN", "inf"] {
            assert!(matches!(parse_rank(raw), Err(AppError::Parse(_))), "{raw}");
            assert_eq!(rank_or_zero(raw), 0);
        }
    }

    #[test]
    fn counters_never_go_negative() {
        assert_eq!(count_or_zero("4"), 4);
        assert_eq!(count_or_zero("4.0"), 4);
        assert_eq!(count_or_zero("-1"), 0);
        assert_eq!(count_or_zero(""), 0);
    }
}
