use crate::core::sequencer::Sequencer;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, GameExport};
use crate::store::Store;
use crate::ui::messages::warning;
use crate::utils::period::{self, parse_optional_period};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Rows in sheet order (logical date, table, daily sequence), limited
    /// to the logical dates inside `range`.
    pub fn collect(store: &mut dyn Store, range: Option<&str>) -> AppResult<Vec<GameExport>> {
        let bounds = parse_optional_period(range)?;
        let rows = Sequencer::sorted(Sequencer::sequence(&store.list_all()?));

        Ok(rows
            .iter()
            .filter(|r| period::contains(&bounds, r.logical_date))
            .map(GameExport::from)
            .collect())
    }

    /// `file` must be absolute. `range`: `None`, `all`, or the period syntax
    /// (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `a:b` of the same shape).
    pub fn export(
        store: &mut dyn Store,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let games = Self::collect(store, range)?;
        if games.is_empty() {
            warning("No games found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&games, path)?,
            ExportFormat::Json => export_json(&games, path)?,
        }

        Ok(games.len())
    }
}
