use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::time::Duration;

/// Two terminals may write the same ledger; wait for the lock instead of
/// failing at once.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Prepare a connection for the ledger: lock wait, then every pending
/// schema migration.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    run_pending_migrations(conn)?;
    Ok(())
}
