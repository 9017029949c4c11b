//! SQLite backend: one `games` row per record, plus the `meta` high-water
//! mark and the internal `log` table.

use super::{Store, schema};
use crate::db::initialize::init_db;
use crate::db::log::{LogEntry, load_log, ttlog};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::models::record::schema_columns;
use rusqlite::types::Value;
use rusqlite::{Row, params_from_iter};
use std::collections::HashMap;

pub struct SqliteStore {
    pool: DbPool,
}

fn unavailable(e: impl std::fmt::Display) -> AppError {
    AppError::StoreUnavailable(e.to_string())
}

/// Any SQLite cell as text, the way the sheet would show it.
fn cell_text(v: Value) -> String {
    match v {
        Value::Null | Value::Blob(_) => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
    }
}

fn map_row(row: &Row, columns: &[String]) -> rusqlite::Result<HashMap<String, String>> {
    let mut out = HashMap::with_capacity(columns.len());
    for (i, col) in columns.iter().enumerate() {
        out.insert(col.clone(), cell_text(row.get::<_, Value>(i)?));
    }
    Ok(out)
}

/// Typed cells for an insert; absent seats and empty counters go in as NULL.
fn to_values(r: &Record) -> AppResult<Vec<Value>> {
    let cells = schema::record_to_fields(r)?;
    let columns = schema_columns();

    Ok(columns
        .iter()
        .zip(cells)
        .map(|(col, cell)| {
            let numeric = matches!(col.as_str(), "GameNo" | "TableNo" | "SetNo")
                || col.ends_with("Rank");
            match (numeric, cell.parse::<i64>()) {
                (true, Ok(n)) => Value::Integer(n),
                (true, Err(_)) if cell.is_empty() => Value::Null,
                _ => Value::Text(cell),
            }
        })
        .collect())
}

impl SqliteStore {
    /// Open (or create) the database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path).map_err(unavailable)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory().map_err(unavailable)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        load_log(&self.pool.conn)
    }

    fn last_game_id(&self) -> AppResult<u64> {
        let v: i64 = self
            .pool
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'last_game_id'",
                [],
                |row| row.get(0),
            )
            .map_err(unavailable)?;
        Ok(v.max(0) as u64)
    }
}

impl Store for SqliteStore {
    fn list_all(&mut self) -> AppResult<Vec<Record>> {
        let columns = schema_columns();
        let sql = format!("SELECT {} FROM games ORDER BY GameNo ASC", columns.join(", "));

        let mut stmt = self.pool.conn.prepare(&sql).map_err(unavailable)?;
        let rows = stmt
            .query_map([], |row| map_row(row, &columns))
            .map_err(unavailable)?;

        let mut out = Vec::new();
        for row in rows {
            let fields = row.map_err(unavailable)?;
            out.push(schema::record_from_fields(|c| fields.get(c).cloned())?);
        }
        Ok(out)
    }

    fn replace_all(&mut self, records: &[Record]) -> AppResult<()> {
        schema::check_unique_ids(records)?;
        let rows = records
            .iter()
            .map(to_values)
            .collect::<AppResult<Vec<_>>>()?;

        let columns = schema_columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let insert = format!(
            "INSERT INTO games ({}) VALUES ({})",
            columns.join(", "),
            placeholders
        );

        // dropping the transaction on any error rolls everything back
        let tx = self.pool.conn.transaction().map_err(unavailable)?;
        tx.execute("DELETE FROM games", []).map_err(unavailable)?;
        {
            let mut stmt = tx.prepare(&insert).map_err(unavailable)?;
            for values in rows {
                stmt.execute(params_from_iter(values))
                    .map_err(|e| AppError::StoreRejected(e.to_string()))?;
            }
        }
        tx.execute(
            "UPDATE meta SET value = MAX(value, ?1) WHERE key = 'last_game_id'",
            [schema::max_game_id(records) as i64],
        )
        .map_err(unavailable)?;
        tx.commit().map_err(unavailable)
    }

    fn reserve_game_id(&mut self) -> AppResult<u64> {
        let stored_max: i64 = self
            .pool
            .conn
            .query_row("SELECT IFNULL(MAX(GameNo), 0) FROM games", [], |row| {
                row.get(0)
            })
            .map_err(unavailable)?;

        let next = self.last_game_id()?.max(stored_max.max(0) as u64) + 1;
        self.pool
            .conn
            .execute(
                "UPDATE meta SET value = ?1 WHERE key = 'last_game_id'",
                [next as i64],
            )
            .map_err(unavailable)?;
        Ok(next)
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;

    fn rec(game_id: u64, seats: usize) -> Record {
        Record {
            game_id,
            table_no: 2,
            set_no: 1,
            timestamp: "2026-01-10 21:00:00".into(),
            note: "２人飛ばし".into(),
            seats: (0..seats)
                .map(|i| Seat::new(&format!("p{i}"), "A", i as i64 + 1))
                .collect(),
        }
    }

    #[test]
    fn round_trip_three_and_four_seats() {
        let mut store = SqliteStore::in_memory().unwrap();
        let records = vec![rec(1, 3), rec(2, 4)];

        store.replace_all(&records).unwrap();
        assert_eq!(store.list_all().unwrap(), records);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.replace_all(&[rec(1, 3), rec(2, 3)]).unwrap();
        store.replace_all(&[rec(1, 3)]).unwrap();

        assert_eq!(store.reserve_game_id().unwrap(), 3);
        assert_eq!(store.reserve_game_id().unwrap(), 4);
    }

    #[test]
    fn duplicate_ids_leave_store_untouched() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.replace_all(&[rec(1, 3)]).unwrap();

        let err = store.replace_all(&[rec(5, 3), rec(5, 3)]).unwrap_err();
        assert!(matches!(err, AppError::StoreRejected(_)));
        assert_eq!(store.list_all().unwrap(), vec![rec(1, 3)]);
    }

    #[test]
    fn audit_lines_are_kept() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.audit("add", "game 1", "table 1 set 1").unwrap();

        let log = store.log_entries().unwrap();
        let last = log.last().unwrap();
        assert_eq!(last.operation, "add");
        assert_eq!(last.target, "game 1");
    }
}
