use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::store::Store;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one game. Its id is retired: later games never reuse it.
    pub fn apply(store: &mut dyn Store, game_id: u64) -> AppResult<Record> {
        let mut records = store.list_all()?;
        let idx = records
            .iter()
            .position(|r| r.game_id == game_id)
            .ok_or(AppError::RecordNotFound(game_id))?;

        let removed = records.remove(idx);
        store.replace_all(&records)?;
        store.audit(
            "del",
            &format!("game {game_id}"),
            &format!(
                "table {} set {} at {}",
                removed.table_no, removed.set_no, removed.timestamp
            ),
        )?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;
    use crate::store::MemoryStore;

    fn rec(game_id: u64) -> Record {
        Record {
            game_id,
            table_no: 1,
            set_no: 1,
            timestamp: "2026-01-10 21:00:00".into(),
            note: String::new(),
            seats: vec![
                Seat::new("X", "A", 1),
                Seat::new("Y", "B", 2),
                Seat::new("Z", "C", 3),
            ],
        }
    }

    #[test]
    fn deleted_id_is_not_reused() {
        let mut store = MemoryStore::with_records(vec![rec(1), rec(2)]);

        let removed = DeleteLogic::apply(&mut store, 2).unwrap();
        assert_eq!(removed.game_id, 2);
        assert_eq!(store.list_all().unwrap(), vec![rec(1)]);
        assert_eq!(store.reserve_game_id().unwrap(), 3);
    }

    #[test]
    fn unknown_id() {
        let mut store = MemoryStore::with_records(vec![rec(1)]);
        assert!(matches!(
            DeleteLogic::apply(&mut store, 5),
            Err(AppError::RecordNotFound(5))
        ));
        assert!(store.audit_lines.is_empty());
    }
}
