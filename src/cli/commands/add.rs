use crate::cli::commands::parse_at;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, NewGame};
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::success;
use crate::utils::date::logical_date_of;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        table,
        new_set,
        at,
        note,
        seats,
    } = cmd
    {
        let game = NewGame {
            table_no: *table,
            start_new_set: *new_set,
            at: parse_at(at.as_deref())?,
            note: note.clone(),
            seats: seats.clone(),
        };

        let mut store = store::open(cfg)?;
        let r = AddLogic::apply(&mut store, &cfg.rules, game)?;

        success(format!(
            "Game {} recorded: table {}, set {}, day {}",
            r.game_id,
            r.table_no,
            r.set_no,
            logical_date_of(&r.timestamp)
        ));
    }

    Ok(())
}
