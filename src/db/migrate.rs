use crate::core::migrate::legacy_set_no;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result, params};

const SET_NO_MIGRATION: &str = "20260112_0002_games_set_no";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Key/value table; holds the game id high-water mark.
fn ensure_meta_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            key   TEXT PRIMARY KEY,
            value INTEGER NOT NULL
        );
        INSERT OR IGNORE INTO meta (key, value) VALUES ('last_game_id', 0);
        "#,
    )?;
    Ok(())
}

fn games_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='games'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn games_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('games')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Column names follow the sheet header so rows map one to one.
/// Rank columns carry no strict type: legacy sheets hold text there.
fn create_games_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            GameNo        INTEGER PRIMARY KEY,
            TableNo       INTEGER NOT NULL DEFAULT 1,
            SetNo         INTEGER,
            Timestamp     TEXT NOT NULL DEFAULT '',
            Note          TEXT NOT NULL DEFAULT '',
            SeatAName     TEXT NOT NULL DEFAULT '',
            SeatACategory TEXT NOT NULL DEFAULT '',
            SeatARank,
            SeatBName     TEXT NOT NULL DEFAULT '',
            SeatBCategory TEXT NOT NULL DEFAULT '',
            SeatBRank,
            SeatCName     TEXT NOT NULL DEFAULT '',
            SeatCCategory TEXT NOT NULL DEFAULT '',
            SeatCRank,
            SeatDName     TEXT NOT NULL DEFAULT '',
            SeatDCategory TEXT NOT NULL DEFAULT '',
            SeatDRank
        );

        CREATE INDEX IF NOT EXISTS idx_games_table_set ON games(TableNo, SetNo);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Older databases kept no set number: add the column and backfill it from
/// the game id.
fn migrate_add_set_no(conn: &Connection) -> Result<()> {
    if migration_applied(conn, SET_NO_MIGRATION)? {
        return Ok(());
    }

    if !games_has_column(conn, "SetNo")? {
        warning("Adding 'SetNo' column to games table...");
        conn.execute("ALTER TABLE games ADD COLUMN SetNo INTEGER", [])?;
    }

    let ids: Vec<i64> = {
        let mut stmt =
            conn.prepare("SELECT GameNo FROM games WHERE SetNo IS NULL OR SetNo <= 0")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<_>>()?
    };

    for id in &ids {
        conn.execute(
            "UPDATE games SET SetNo = ?1 WHERE GameNo = ?2",
            params![legacy_set_no((*id).max(0) as u64), id],
        )?;
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![
            SET_NO_MIGRATION,
            format!("Backfilled SetNo for {} games", ids.len())
        ],
    )?;

    if !ids.is_empty() {
        success(format!(
            "Migration applied: {} → backfilled SetNo for {} games",
            SET_NO_MIGRATION,
            ids.len()
        ));
    }

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_meta_table(conn)?;

    if games_table_exists(conn)? {
        migrate_add_set_no(conn)?;
    } else {
        create_games_table(conn)?;
        // fresh schema already has the column
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'Created games table')",
            [SET_NO_MIGRATION],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_table_gets_set_numbers() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE games (GameNo INTEGER PRIMARY KEY, TableNo INTEGER, Timestamp TEXT,
                                 Note TEXT);
             INSERT INTO games VALUES (3, 1, '2025-12-01 20:00', '');
             INSERT INTO games VALUES (12, 1, '2025-12-01 22:00', '');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let sets: Vec<(i64, i64)> = conn
            .prepare("SELECT GameNo, SetNo FROM games ORDER BY GameNo")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(sets, vec![(3, 1), (12, 2)]);

        // idempotent
        run_pending_migrations(&conn).unwrap();
    }
}
