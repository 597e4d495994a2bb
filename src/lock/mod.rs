//! Per-key locks used to serialize read-modify-write sequences.
//!
//! The vote engine takes one lock per book before it checks for an existing vote
//! and before it rewrites that book's stats record, so two votes on the same book
//! in one process never interleave. `LockManager::acquire` hands back a
//! [`LockGuard`] that releases the lock when dropped, including on early `?` returns.

mod error;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use in_memory::{InMemoryLock, InMemoryLockManager};
pub use lock::Lock;
pub use lock_manager::{LockGuard, LockManager};
