//! Persistence boundary. Every mutation is a whole-collection
//! read-modify-write: `list_all`, change in memory, `replace_all`.

pub mod cache;
pub mod csv_store;
pub mod schema;
pub mod sqlite_store;

pub use cache::CachedStore;
pub use csv_store::CsvStore;
pub use sqlite_store::SqliteStore;

use crate::config::{Config, StoreBackend};
use crate::errors::AppResult;
use crate::models::Record;
use std::time::Duration;

pub trait Store {
    fn list_all(&mut self) -> AppResult<Vec<Record>>;

    /// Overwrite the whole collection. Either every row is written or none.
    fn replace_all(&mut self, records: &[Record]) -> AppResult<()>;

    /// Hand out the next game id. Ids are never handed out twice, even when
    /// the record that carried one was deleted.
    fn reserve_game_id(&mut self) -> AppResult<u64>;

    /// Append a line to the internal audit trail, when the backend keeps one.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn list_all(&mut self) -> AppResult<Vec<Record>> {
        (**self).list_all()
    }

    fn replace_all(&mut self, records: &[Record]) -> AppResult<()> {
        (**self).replace_all(records)
    }

    fn reserve_game_id(&mut self) -> AppResult<u64> {
        (**self).reserve_game_id()
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        (**self).audit(operation, target, message)
    }
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<Record>,
    last_game_id: u64,
    pub audit_lines: Vec<(String, String, String)>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<Record>) -> Self {
        let last_game_id = schema::max_game_id(&records);
        Self {
            records,
            last_game_id,
            audit_lines: Vec::new(),
        }
    }
}

impl Store for MemoryStore {
    fn list_all(&mut self) -> AppResult<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, records: &[Record]) -> AppResult<()> {
        schema::check_unique_ids(records)?;
        self.last_game_id = self.last_game_id.max(schema::max_game_id(records));
        self.records = records.to_vec();
        Ok(())
    }

    fn reserve_game_id(&mut self) -> AppResult<u64> {
        self.last_game_id = self.last_game_id.max(schema::max_game_id(&self.records)) + 1;
        Ok(self.last_game_id)
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.audit_lines
            .push((operation.into(), target.into(), message.into()));
        Ok(())
    }
}

/// Open the backend selected by the configuration, behind the read cache.
pub fn open(cfg: &Config) -> AppResult<CachedStore<Box<dyn Store>>> {
    let inner: Box<dyn Store> = match cfg.backend {
        StoreBackend::Sqlite => Box::new(SqliteStore::open(&cfg.store)?),
        StoreBackend::Csv => Box::new(CsvStore::new(&cfg.store)),
    };
    Ok(CachedStore::new(
        inner,
        Duration::from_secs(cfg.cache_ttl_secs),
    ))
}
