use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::success;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut store = store::open(cfg)?;
        let report = ImportLogic::from_csv(&mut store, &cfg.rules, Path::new(file))?;

        success(format!("Imported {} games from {file}", report.imported));
    }

    Ok(())
}
