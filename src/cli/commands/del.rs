use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{info, success, warning};
use std::io::{self, Write};

fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { game_id, force } = cmd {
        if !*force
            && !ask_confirmation(&format!(
                "Delete game {game_id}? This action is irreversible."
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut store = store::open(cfg)?;
        let removed = DeleteLogic::apply(&mut store, *game_id)?;
        success(format!(
            "Game {} (table {}, {}) has been deleted.",
            removed.game_id, removed.table_no, removed.timestamp
        ));
    }

    Ok(())
}
