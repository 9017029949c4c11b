use crate::core::sequencer::Sequencer;
use crate::errors::AppResult;
use crate::models::{Record, Rules, Seat};
use crate::store::Store;
use crate::utils::date::{self, logical_date};
use chrono::NaiveDateTime;

/// Input of the entry form.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub table_no: u32,
    /// Close the current set and open the next one with this game.
    pub start_new_set: bool,
    /// Defaults to now.
    pub at: Option<NaiveDateTime>,
    pub note: String,
    pub seats: Vec<Seat>,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate, number and append a game. Nothing is written when the game
    /// is invalid, and no game id is consumed either.
    pub fn apply(store: &mut dyn Store, rules: &Rules, game: NewGame) -> AppResult<Record> {
        let at = game.at.unwrap_or_else(date::now);

        let mut records = store.list_all()?;
        let rows = Sequencer::sequence(&records);
        let slot = Sequencer::next_slot(&rows, game.table_no, logical_date(at));

        let set_no = if game.start_new_set && !slot.opens_day() {
            slot.set_no + 1
        } else {
            slot.set_no
        };

        let mut record = Record::new(0, game.table_no, set_no, at, &game.note, game.seats);
        record.validate(rules)?;

        record.game_id = store.reserve_game_id()?;
        records.push(record.clone());
        store.replace_all(&records)?;

        store.audit(
            "add",
            &format!("game {}", record.game_id),
            &format!(
                "table {} set {} #{} at {}",
                record.table_no, record.set_no, slot.daily_sequence, record.timestamp
            ),
        )?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2026, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
    }

    fn game(table_no: u32, new_set: bool, when: Option<NaiveDateTime>, ranks: [i64; 3]) -> NewGame {
        NewGame {
            table_no,
            start_new_set: new_set,
            at: when,
            note: String::new(),
            seats: vec![
                Seat::new("X", "A", ranks[0]),
                Seat::new("Y", "B", ranks[1]),
                Seat::new("Z", "C", ranks[2]),
            ],
        }
    }

    #[test]
    fn numbers_games_and_sets() {
        let rules = Rules::default();
        let mut store = MemoryStore::default();

        let g1 = AddLogic::apply(&mut store, &rules, game(1, true, at(20, 0), [1, 2, 3])).unwrap();
        let g2 = AddLogic::apply(&mut store, &rules, game(1, false, at(20, 30), [2, 1, 3])).unwrap();
        let g3 = AddLogic::apply(&mut store, &rules, game(1, true, at(21, 0), [3, 2, 1])).unwrap();
        let other = AddLogic::apply(&mut store, &rules, game(2, false, at(21, 0), [1, 2, 3])).unwrap();

        assert_eq!((g1.game_id, g1.set_no), (1, 1));
        assert_eq!((g2.game_id, g2.set_no), (2, 1));
        assert_eq!((g3.game_id, g3.set_no), (3, 2));
        assert_eq!((other.game_id, other.set_no), (4, 1));
        assert_eq!(store.list_all().unwrap().len(), 4);
        assert_eq!(store.audit_lines.len(), 4);
    }

    #[test]
    fn invalid_game_is_not_written() {
        let rules = Rules::default();
        let mut store = MemoryStore::default();

        let err = AddLogic::apply(&mut store, &rules, game(1, false, at(20, 0), [1, 1, 3]));
        assert!(matches!(err, Err(AppError::Validation(_))));
        assert!(store.list_all().unwrap().is_empty());

        let ok = AddLogic::apply(&mut store, &rules, game(1, false, at(20, 0), [1, 2, 3])).unwrap();
        assert_eq!(ok.game_id, 1);
    }
}
