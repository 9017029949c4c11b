use crate::cli::parser::Commands;
use crate::config::{Config, StoreBackend};
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        match cfg.backend {
            StoreBackend::Sqlite => LogLogic::print_log(&SqliteStore::open(&cfg.store)?)?,
            StoreBackend::Csv => warning("The CSV store keeps no internal log."),
        }
    }

    Ok(())
}
