use std::sync::Arc;
use std::time::Duration;

use super::CacheError;

/// Byte-level key-value cache with per-entry expiry.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Delete every key starting with `prefix`; returns how many were removed.
    fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError>;
}

impl<T: CacheStore + ?Sized> CacheStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        (**self).delete_prefix(prefix)
    }
}
