use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::keys::REVIEWS_PREFIX;
use super::{keys, CacheError, CacheStore};

/// Entry lifetime when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Typed, fail-open wrapper over a [`CacheStore`]. Values are bitcode-encoded.
pub struct CacheGateway<C> {
    store: C,
    ttl: Duration,
}

impl<C: CacheStore> CacheGateway<C> {
    pub fn new(store: C) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    pub fn with_ttl(store: C, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => bitcode::deserialize(&bytes)
                .map(Some)
                .map_err(|e| CacheError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    /// Cached value, or `None` on a miss or any cache failure.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(hit) => {
                debug!(key, hit = hit.is_some(), "cache lookup");
                hit
            }
            Err(err) => {
                warn!(key, error = %err, "cache read failed; treating as miss");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let result = bitcode::serialize(value)
            .map_err(|e| CacheError::Encode(e.to_string()))
            .and_then(|bytes| self.store.set(key, bytes, self.ttl));
        if let Err(err) = result {
            warn!(key, error = %err, "cache write failed");
        }
    }

    /// Serve from cache, or run `load` and cache its result.
    pub fn get_or_load<T, E, F>(&self, key: &str, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let value = load()?;
        self.set(key, &value);
        Ok(value)
    }

    /// Drop a review's entry and every review listing.
    pub fn invalidate_review(&self, review_id: &str) {
        let key = keys::review(review_id);
        if let Err(err) = self.store.delete(&key) {
            warn!(key = %key, error = %err, "cache invalidation failed");
        }
        match self.store.delete_prefix(REVIEWS_PREFIX) {
            Ok(removed) => debug!(review_id, removed, "review listings invalidated"),
            Err(err) => warn!(error = %err, "cache listing invalidation failed"),
        }
    }
}
