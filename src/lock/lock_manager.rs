use std::sync::Arc;

use tracing::warn;

use super::{Lock, LockError};

/// Hands out one lock per key.
///
/// Repeated calls with the same key must return the same logical lock.
pub trait LockManager: Send + Sync {
    type Lock: Lock;

    /// Get (or create) the lock for `key`.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Block until the lock for `key` is held; it is released when the guard drops.
    fn acquire(&self, key: &str) -> Result<LockGuard<Self::Lock>, LockError> {
        let lock = self.get_lock(key)?;
        lock.lock()?;
        Ok(LockGuard {
            lock,
            key: key.to_string(),
        })
    }
}

/// Holds a lock until dropped.
pub struct LockGuard<L: Lock> {
    lock: Arc<L>,
    key: String,
}

impl<L: Lock> LockGuard<L> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<L: Lock> Drop for LockGuard<L> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            warn!(key = %self.key, error = %err, "failed to release lock");
        }
    }
}
