use super::LockError;

/// A single lock instance.
///
/// In-memory locks use `Mutex` + `Condvar`; a multi-process deployment would back
/// this with something shared (a Redis `SET NX PX` key, a Postgres advisory lock).
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}
