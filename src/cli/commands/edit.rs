use crate::cli::commands::{describe_seats, parse_at};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::{EditLogic, GamePatch};
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        game_id,
        table,
        set,
        at,
        note,
        seats,
    } = cmd
    {
        let patch = GamePatch {
            table_no: *table,
            set_no: *set,
            at: parse_at(at.as_deref())?,
            note: note.clone(),
            seats: (!seats.is_empty()).then(|| seats.clone()),
        };

        let mut store = store::open(cfg)?;
        let r = EditLogic::apply(&mut store, &cfg.rules, *game_id, patch)?;

        success(format!(
            "Game {} updated: table {}, set {}, {} {}",
            r.game_id,
            r.table_no,
            r.set_no,
            r.timestamp,
            describe_seats(&r)
        ));
    }

    Ok(())
}
