use crate::errors::{AppError, AppResult};
use crate::models::{Record, Rules, Seat};
use crate::store::Store;
use chrono::NaiveDateTime;

/// Fields to change on an existing game; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub table_no: Option<u32>,
    pub set_no: Option<u32>,
    pub at: Option<NaiveDateTime>,
    pub note: Option<String>,
    /// Replaces all seats at once.
    pub seats: Option<Vec<Seat>>,
}

impl GamePatch {
    pub fn is_empty(&self) -> bool {
        self.table_no.is_none()
            && self.set_no.is_none()
            && self.at.is_none()
            && self.note.is_none()
            && self.seats.is_none()
    }

    fn apply_to(self, r: &mut Record) {
        if let Some(t) = self.table_no {
            r.table_no = t;
        }
        if let Some(s) = self.set_no {
            r.set_no = s;
        }
        if let Some(at) = self.at {
            r.set_timestamp(at);
        }
        if let Some(note) = self.note {
            r.note = note;
        }
        if let Some(seats) = self.seats {
            r.seats = seats;
        }
    }
}

pub struct EditLogic;

impl EditLogic {
    /// Edit a game in place. The game id never changes.
    pub fn apply(
        store: &mut dyn Store,
        rules: &Rules,
        game_id: u64,
        patch: GamePatch,
    ) -> AppResult<Record> {
        if patch.is_empty() {
            return Err(AppError::Validation("nothing to change".into()));
        }

        let mut records = store.list_all()?;
        let target = records
            .iter_mut()
            .find(|r| r.game_id == game_id)
            .ok_or(AppError::RecordNotFound(game_id))?;

        let mut edited = target.clone();
        patch.apply_to(&mut edited);
        edited.validate(rules)?;
        *target = edited.clone();

        store.replace_all(&records)?;
        store.audit(
            "edit",
            &format!("game {game_id}"),
            &format!(
                "table {} set {} at {}",
                edited.table_no, edited.set_no, edited.timestamp
            ),
        )?;

        Ok(edited)
    }
}
