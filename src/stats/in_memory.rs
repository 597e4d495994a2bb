//! InMemoryBookStatsStore - HashMap-backed aggregate store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{BookStats, BookStatsStore, Versioned};
use crate::error::StoreError;
use crate::review::BookId;

const COLLECTION: &str = "book_stats";

struct StoredStats {
    bytes: Vec<u8>,
    version: u64,
}

/// Aggregates held in memory as serialized JSON, keyed `book_stats:<bookId>`.
#[derive(Clone, Default)]
pub struct InMemoryBookStatsStore {
    storage: Arc<RwLock<HashMap<String, StoredStats>>>,
}

impl InMemoryBookStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(book_id: BookId) -> String {
        format!("{}:{}", COLLECTION, book_id)
    }

    fn write(&self, stats: &BookStats, expected: Option<u64>) -> Result<u64, StoreError> {
        let key = Self::make_key(stats.book_id);
        let bytes = serde_json::to_vec(stats)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let current = storage.get(&key).map(|s| s.version).unwrap_or(0);
        if let Some(expected) = expected {
            if current != expected {
                return Err(StoreError::Conflict {
                    collection: COLLECTION,
                    id: stats.book_id.to_string(),
                    expected,
                    actual: current,
                });
            }
        }

        let version = current + 1;
        storage.insert(key, StoredStats { bytes, version });
        Ok(version)
    }
}

impl BookStatsStore for InMemoryBookStatsStore {
    fn get(&self, book_id: BookId) -> Result<Option<Versioned<BookStats>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        match storage.get(&Self::make_key(book_id)) {
            Some(stored) => Ok(Some(Versioned {
                data: serde_json::from_slice(&stored.bytes)?,
                version: stored.version,
            })),
            None => Ok(None),
        }
    }

    fn put(&self, stats: &BookStats) -> Result<u64, StoreError> {
        self.write(stats, None)
    }

    fn put_if_version(&self, stats: &BookStats, expected_version: u64) -> Result<u64, StoreError> {
        self.write(stats, Some(expected_version))
    }
}
