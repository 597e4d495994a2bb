use std::sync::Arc;

use super::{BookStats, Versioned};
use crate::error::StoreError;
use crate::review::BookId;

/// Key-value storage for book aggregates, keyed by book id.
pub trait BookStatsStore: Send + Sync {
    /// Read an aggregate. `None` means the book has never been voted on, which
    /// callers treat as the zero aggregate.
    fn get(&self, book_id: BookId) -> Result<Option<Versioned<BookStats>>, StoreError>;

    /// Full replace with no version check. Returns the new version.
    fn put(&self, stats: &BookStats) -> Result<u64, StoreError>;

    /// Replace only if the stored version still equals `expected_version`
    /// (`0` meaning "no record yet"). Fails with `StoreError::Conflict` otherwise.
    fn put_if_version(&self, stats: &BookStats, expected_version: u64) -> Result<u64, StoreError>;
}

impl<T: BookStatsStore + ?Sized> BookStatsStore for Arc<T> {
    fn get(&self, book_id: BookId) -> Result<Option<Versioned<BookStats>>, StoreError> {
        (**self).get(book_id)
    }

    fn put(&self, stats: &BookStats) -> Result<u64, StoreError> {
        (**self).put(stats)
    }

    fn put_if_version(&self, stats: &BookStats, expected_version: u64) -> Result<u64, StoreError> {
        (**self).put_if_version(stats, expected_version)
    }
}
