//! Bring games from another sheet into the active store.

use crate::errors::{AppError, AppResult};
use crate::models::{Record, Rules};
use crate::store::{CsvStore, Store};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Append every game of the CSV sheet at `path`. Game ids are kept, so
    /// an id already present in the store rejects the whole import. So does
    /// any game failing the entry checks.
    pub fn from_csv(store: &mut dyn Store, rules: &Rules, path: &Path) -> AppResult<ImportReport> {
        if !path.exists() {
            return Err(AppError::StoreUnavailable(format!(
                "{}: no such file",
                path.display()
            )));
        }
        let incoming = CsvStore::new(path).list_all()?;
        Self::merge(store, rules, incoming)
    }

    pub fn merge(
        store: &mut dyn Store,
        rules: &Rules,
        incoming: Vec<Record>,
    ) -> AppResult<ImportReport> {
        let mut records = store.list_all()?;
        let existing: HashSet<u64> = records.iter().map(|r| r.game_id).collect();

        let mut clashes: Vec<u64> = incoming
            .iter()
            .map(|r| r.game_id)
            .filter(|id| existing.contains(id))
            .collect();
        if !clashes.is_empty() {
            clashes.sort_unstable();
            clashes.dedup();
            let ids: Vec<String> = clashes.iter().map(u64::to_string).collect();
            return Err(AppError::StoreRejected(format!(
                "game numbers already in use: {}",
                ids.join(", ")
            )));
        }

        let invalid: Vec<String> = incoming
            .iter()
            .filter_map(|r| {
                r.validate(rules)
                    .err()
                    .map(|e| format!("game {}: {e}", r.game_id))
            })
            .collect();
        if !invalid.is_empty() {
            return Err(AppError::Validation(format!(
                "import refused, {} games fail the entry checks ({})",
                invalid.len(),
                invalid.join("; ")
            )));
        }

        let report = ImportReport {
            imported: incoming.len(),
        };

        records.extend(incoming);
        store.replace_all(&records)?;
        store.audit("import", "", &format!("{} games", report.imported))?;

        Ok(report)
    }
}
