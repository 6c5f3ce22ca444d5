//! Id-keyed in-memory store for generated records (content, clusters).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cache::{Cache, TtlCache};
use crate::errors::AppError;

pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

pub struct RecordStore<T> {
    kind: &'static str,
    cache: Arc<dyn Cache<Uuid, T>>,
}

impl<T: Record> RecordStore<T> {
    /// `kind` names the record in not-found messages ("Content", "Topic cluster").
    pub fn new(kind: &'static str, cache: Arc<dyn Cache<Uuid, T>>) -> Self {
        Self { kind, cache }
    }

    pub fn in_memory(kind: &'static str) -> Self {
        Self::new(kind, Arc::new(TtlCache::unbounded()))
    }

    pub fn insert(&self, record: T) -> T {
        self.cache.set(record.id(), record.clone());
        record
    }

    /// Newest first.
    pub fn list(&self) -> Vec<T> {
        let mut records = self.cache.values();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        records
    }

    pub fn get(&self, id: Uuid) -> Result<T, AppError> {
        self.cache
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", self.kind)))
    }

    pub fn delete(&self, id: Uuid) -> Result<T, AppError> {
        self.cache
            .evict(&id)
            .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", self.kind)))
    }
}
