//! Time-boxed read-through cache in front of a store.

use super::Store;
use crate::errors::AppResult;
use crate::models::Record;
use std::time::{Duration, Instant};

pub struct CachedStore<S> {
    inner: S,
    ttl: Duration,
    cached: Option<(Instant, Vec<Record>)>,
}

impl<S: Store> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: None,
        }
    }

    /// Forget the cached snapshot; the next read goes to the backend.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn fresh(&self) -> Option<&Vec<Record>> {
        self.cached
            .as_ref()
            .filter(|(at, _)| at.elapsed() < self.ttl)
            .map(|(_, records)| records)
    }
}

impl<S: Store> Store for CachedStore<S> {
    fn list_all(&mut self) -> AppResult<Vec<Record>> {
        if let Some(records) = self.fresh() {
            return Ok(records.clone());
        }

        let records = self.inner.list_all()?;
        if !self.ttl.is_zero() {
            self.cached = Some((Instant::now(), records.clone()));
        }
        Ok(records)
    }

    /// The snapshot is dropped before the write, whether or not it succeeds.
    fn replace_all(&mut self, records: &[Record]) -> AppResult<()> {
        self.invalidate();
        self.inner.replace_all(records)
    }

    fn reserve_game_id(&mut self) -> AppResult<u64> {
        self.inner.reserve_game_id()
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.inner.audit(operation, target, message)
    }
}
