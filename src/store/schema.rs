//! Row ⇄ Record mapping shared by the backends.
//!
//! Reading is tolerant: dirty ranks become 0, a missing set number is
//! backfilled, an unreadable timestamp is kept verbatim. Only a row without a
//! usable GameNo is refused, since nothing else identifies it.

use crate::core::migrate::migrate_set_no;
use crate::errors::{AppError, AppResult};
use crate::models::record::{
    COL_GAME_NO, COL_NOTE, COL_SET_NO, COL_TABLE_NO, COL_TIMESTAMP, SEAT_LETTERS, seat_columns,
};
use crate::models::{Record, Seat};
use crate::utils::number::{count_or_zero, parse_int, rank_or_zero};
use std::collections::HashSet;

/// Columns a source must carry. SetNo and the fourth seat are optional.
pub fn required_columns() -> Vec<String> {
    let mut cols: Vec<String> = [COL_GAME_NO, COL_TABLE_NO, COL_TIMESTAMP, COL_NOTE]
        .iter()
        .map(|c| c.to_string())
        .collect();
    for letter in &SEAT_LETTERS[..3] {
        cols.extend(seat_columns(*letter));
    }
    cols
}

pub fn check_header(header: &[String]) -> AppResult<()> {
    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|c| !header.iter().any(|h| h.trim() == c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::StoreRejected(format!(
            "missing columns: {}",
            missing.join(", ")
        )))
    }
}

pub fn record_from_fields<F>(field: F) -> AppResult<Record>
where
    F: Fn(&str) -> Option<String>,
{
    let text = |col: &str| field(col).unwrap_or_default();

    let raw_id = text(COL_GAME_NO);
    let game_id = parse_int(&raw_id)
        .and_then(|n| u64::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::StoreRejected(format!("invalid GameNo '{raw_id}'")))?;

    let stored_set = field(COL_SET_NO)
        .map(|s| count_or_zero(&s))
        .filter(|n| *n > 0);

    let mut seats: Vec<Seat> = SEAT_LETTERS
        .iter()
        .map(|letter| {
            let [name, category, rank] = seat_columns(*letter);
            Seat {
                name: text(&name),
                category: text(&category),
                rank: rank_or_zero(&text(&rank)),
            }
        })
        .collect();
    while seats.len() > 3 && seats.last().is_some_and(Seat::is_blank) {
        seats.pop();
    }

    Ok(Record {
        game_id,
        table_no: count_or_zero(&text(COL_TABLE_NO)),
        set_no: migrate_set_no(game_id, stored_set),
        timestamp: text(COL_TIMESTAMP),
        note: text(COL_NOTE),
        seats,
    })
}

/// Cells in [`schema_columns`](crate::models::record::schema_columns) order.
pub fn record_to_fields(r: &Record) -> AppResult<Vec<String>> {
    if r.seats.len() > SEAT_LETTERS.len() {
        return Err(AppError::StoreRejected(format!(
            "game {} has {} seats, at most {} fit the schema",
            r.game_id,
            r.seats.len(),
            SEAT_LETTERS.len()
        )));
    }

    let mut out = vec![
        r.game_id.to_string(),
        r.table_no.to_string(),
        r.set_no.to_string(),
        r.timestamp.clone(),
        r.note.clone(),
    ];

    for i in 0..SEAT_LETTERS.len() {
        match r.seats.get(i) {
            Some(s) => out.extend([s.name.clone(), s.category.clone(), s.rank.to_string()]),
            None => out.extend([String::new(), String::new(), String::new()]),
        }
    }

    Ok(out)
}

pub fn check_unique_ids(records: &[Record]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for r in records {
        if !seen.insert(r.game_id) {
            return Err(AppError::StoreRejected(format!(
                "duplicate GameNo {}",
                r.game_id
            )));
        }
    }
    Ok(())
}

pub fn max_game_id(records: &[Record]) -> u64 {
    records.iter().map(|r| r.game_id).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::schema_columns;
    use std::collections::HashMap;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn legacy_row_without_set_no_is_backfilled() {
        let row = fields(&[
            ("GameNo", "23"),
            ("TableNo", "2.0"),
            ("Timestamp", "2025-12-01 20:00"),
            ("Note", ""),
            ("SeatAName", "X"),
            ("SeatACategory", "A"),
            ("SeatARank", "1.0"),
            ("SeatBName", "Y"),
            ("SeatBCategory", "B"),
            ("SeatBRank", "two"),
            ("SeatCName", "Z"),
            ("SeatCCategory", "C"),
            ("SeatCRank", "3"),
        ]);

        let r = record_from_fields(|c| row.get(c).cloned()).unwrap();
        assert_eq!(r.game_id, 23);
        assert_eq!(r.table_no, 2);
        assert_eq!(r.set_no, 3);
        assert_eq!(r.seats.len(), 3);
        assert_eq!(r.seats[0].rank, 1);
        assert_eq!(r.seats[1].rank, 0);
    }

    #[test]
    fn row_without_game_no_is_rejected() {
        let row = fields(&[("GameNo", "abc")]);
        assert!(matches!(
            record_from_fields(|c| row.get(c).cloned()),
            Err(AppError::StoreRejected(_))
        ));
    }

    #[test]
    fn fields_round_trip() {
        let r = Record {
            game_id: 4,
            table_no: 1,
            set_no: 2,
            timestamp: "2026-01-10 21:00:00".into(),
            note: "２人飛ばし".into(),
            seats: vec![
                Seat::new("鈴木", "A", 2),
                Seat::new("佐藤", "B", 1),
                Seat::new("田中", "C", 4),
                Seat::new("高橋", "D", 3),
            ],
        };

        let cells = record_to_fields(&r).unwrap();
        let row: HashMap<String, String> = schema_columns().into_iter().zip(cells).collect();
        assert_eq!(record_from_fields(|c| row.get(c).cloned()).unwrap(), r);
    }

    #[test]
    fn header_check_names_missing_columns() {
        let header: Vec<String> = required_columns()
            .into_iter()
            .filter(|c| c != "SeatBRank")
            .collect();
        let err = check_header(&header).unwrap_err();
        assert!(err.to_string().contains("SeatBRank"));
        assert!(check_header(&required_columns()).is_ok());
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let r = Record {
            game_id: 1,
            table_no: 1,
            set_no: 1,
            timestamp: String::new(),
            note: String::new(),
            seats: Vec::new(),
        };
        assert!(check_unique_ids(&[r.clone(), r]).is_err());
    }
}
