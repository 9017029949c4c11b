use super::rules::Rules;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{self, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Seat letters, in column order. Three-player games leave `D` empty.
pub const SEAT_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Column names used across the store boundary.
pub const COL_GAME_NO: &str = "GameNo";
pub const COL_TABLE_NO: &str = "TableNo";
pub const COL_SET_NO: &str = "SetNo";
pub const COL_TIMESTAMP: &str = "Timestamp";
pub const COL_NOTE: &str = "Note";

pub fn seat_columns(letter: char) -> [String; 3] {
    [
        format!("Seat{letter}Name"),
        format!("Seat{letter}Category"),
        format!("Seat{letter}Rank"),
    ]
}

/// Full header, in the order the CSV backend writes it.
pub fn schema_columns() -> Vec<String> {
    let mut cols: Vec<String> = [COL_GAME_NO, COL_TABLE_NO, COL_SET_NO, COL_TIMESTAMP, COL_NOTE]
        .iter()
        .map(|c| c.to_string())
        .collect();
    for letter in SEAT_LETTERS {
        cols.extend(seat_columns(letter));
    }
    cols
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Seat {
    pub name: String,
    pub category: String,
    pub rank: i64,
}

impl Seat {
    pub fn new(name: &str, category: &str, rank: i64) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            rank,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.category.trim().is_empty() && self.rank == 0
    }
}

/// One finished game as it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub game_id: u64,
    pub table_no: u32,
    pub set_no: u32,
    /// Kept as stored: legacy rows may carry anything here.
    pub timestamp: String,
    pub note: String,
    pub seats: Vec<Seat>,
}

impl Record {
    pub fn new(
        game_id: u64,
        table_no: u32,
        set_no: u32,
        at: NaiveDateTime,
        note: &str,
        seats: Vec<Seat>,
    ) -> Self {
        Self {
            game_id,
            table_no,
            set_no,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            note: note.to_string(),
            seats,
        }
    }

    pub fn parsed_timestamp(&self) -> AppResult<NaiveDateTime> {
        date::parse_timestamp(&self.timestamp)
    }

    pub fn set_timestamp(&mut self, at: NaiveDateTime) {
        self.timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    }

    /// Seat that finished first, if any.
    pub fn winner(&self) -> Option<&Seat> {
        self.seats.iter().find(|s| s.rank == 1)
    }

    /// Checks applied before a record may reach the store.
    pub fn validate(&self, rules: &Rules) -> AppResult<()> {
        if self.table_no == 0 {
            return Err(AppError::Validation("table number must be positive".into()));
        }
        if self.set_no == 0 {
            return Err(AppError::Validation("set number must be positive".into()));
        }
        if self.seats.len() != rules.seat_count {
            return Err(AppError::Validation(format!(
                "expected {} seats, got {}",
                rules.seat_count,
                self.seats.len()
            )));
        }

        for (letter, seat) in SEAT_LETTERS.iter().zip(&self.seats) {
            if seat.name.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "seat {letter}: player name is empty"
                )));
            }
            if !rules.is_known_category(&seat.category) {
                return Err(AppError::Validation(format!(
                    "seat {letter}: unknown category '{}'",
                    seat.category
                )));
            }
        }

        check_finish_ranks(&self.seats)
    }
}

/// Ranks across the seats must be exactly 1..=N.
pub fn check_finish_ranks(seats: &[Seat]) -> AppResult<()> {
    let n = seats.len() as i64;
    let mut seen = vec![false; seats.len()];

    for seat in seats {
        if seat.rank < 1 || seat.rank > n {
            return Err(AppError::Validation(format!(
                "finish rank {} for '{}' is outside 1..={}",
                seat.rank, seat.name, n
            )));
        }
        let slot = &mut seen[(seat.rank - 1) as usize];
        if *slot {
            return Err(AppError::Validation(format!(
                "finish rank {} is assigned twice",
                seat.rank
            )));
        }
        *slot = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(ranks: &[i64]) -> Vec<Seat> {
        ranks
            .iter()
            .enumerate()
            .map(|(i, r)| Seat::new(&format!("p{i}"), "A", *r))
            .collect()
    }

    fn record(ranks: &[i64]) -> Record {
        Record {
            game_id: 1,
            table_no: 1,
            set_no: 1,
            timestamp: "2026-01-10 21:00:00".into(),
            note: String::new(),
            seats: seats(ranks),
        }
    }

    #[test]
    fn accepts_permutations() {
        assert!(check_finish_ranks(&seats(&[2, 3, 1])).is_ok());
        assert!(check_finish_ranks(&seats(&[4, 1, 3, 2])).is_ok());
    }

    #[test]
    fn rejects_ties_gaps_and_zero() {
        for bad in [&[1, 1, 2][..], &[1, 2, 4], &[0, 1, 2], &[1, 2, 3, 3]] {
            assert!(matches!(
                check_finish_ranks(&seats(bad)),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn validate_checks_names_categories_and_seat_count() {
        let rules = Rules::default();
        assert!(record(&[1, 2, 3]).validate(&rules).is_ok());

        let mut r = record(&[1, 2, 3]);
        r.seats[1].name = "  ".into();
        assert!(matches!(r.validate(&rules), Err(AppError::Validation(_))));

        let mut r = record(&[1, 2, 3]);
        r.seats[2].category = "VIP".into();
        assert!(matches!(r.validate(&rules), Err(AppError::Validation(_))));

        assert!(record(&[1, 2, 3, 4]).validate(&rules).is_err());
        assert!(record(&[1, 2, 3, 4]).validate(&Rules::four_players()).is_ok());
    }

    #[test]
    fn schema_has_all_seat_columns() {
        let cols = schema_columns();
        assert_eq!(cols.len(), 17);
        assert_eq!(cols[0], "GameNo");
        assert_eq!(cols[16], "SeatDRank");
    }
}
