use std::sync::Arc;

use crate::error::StoreError;

use super::{BookId, Review, ReviewPatch, ScanCursor, UserId};

/// Listing cap when the caller does not page explicitly.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a full-table scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub reviews: Vec<Review>,
    /// Set when more reviews remain after this page.
    pub last_evaluated_key: Option<ScanCursor>,
}

/// Storage for review records.
///
/// Every list operation returns reviews newest first. Secondary lookups (by book,
/// by user, by book and user) may be eventually consistent in a real backend.
pub trait ReviewStore: Send + Sync {
    /// Insert a new review. Fails with `Duplicate` if the user already has a
    /// review for that book, or the id is taken.
    fn insert(&self, review: &Review) -> Result<(), StoreError>;

    /// Merge `patch` into the stored review; returns the updated record, or
    /// `None` if no review has that id.
    fn update(&self, review_id: &str, patch: &ReviewPatch) -> Result<Option<Review>, StoreError>;

    /// Delete by id; returns whether a record was removed.
    fn delete_by_id(&self, review_id: &str) -> Result<bool, StoreError>;

    fn get_by_id(&self, review_id: &str) -> Result<Option<Review>, StoreError>;

    fn get_by_book_and_user(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<Review>, StoreError>;

    fn list_by_book_id(&self, book_id: BookId, limit: usize) -> Result<Vec<Review>, StoreError>;

    fn list_by_user_id(&self, user_id: UserId, limit: usize) -> Result<Vec<Review>, StoreError>;

    /// Scan all reviews, resuming after `cursor` when given.
    fn scan(&self, limit: usize, cursor: Option<&ScanCursor>) -> Result<ScanPage, StoreError>;
}

impl<T: ReviewStore + ?Sized> ReviewStore for Arc<T> {
    fn insert(&self, review: &Review) -> Result<(), StoreError> {
        (**self).insert(review)
    }

    fn update(&self, review_id: &str, patch: &ReviewPatch) -> Result<Option<Review>, StoreError> {
        (**self).update(review_id, patch)
    }

    fn delete_by_id(&self, review_id: &str) -> Result<bool, StoreError> {
        (**self).delete_by_id(review_id)
    }

    fn get_by_id(&self, review_id: &str) -> Result<Option<Review>, StoreError> {
        (**self).get_by_id(review_id)
    }

    fn get_by_book_and_user(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<Review>, StoreError> {
        (**self).get_by_book_and_user(book_id, user_id)
    }

    fn list_by_book_id(&self, book_id: BookId, limit: usize) -> Result<Vec<Review>, StoreError> {
        (**self).list_by_book_id(book_id, limit)
    }

    fn list_by_user_id(&self, user_id: UserId, limit: usize) -> Result<Vec<Review>, StoreError> {
        (**self).list_by_user_id(user_id, limit)
    }

    fn scan(&self, limit: usize, cursor: Option<&ScanCursor>) -> Result<ScanPage, StoreError> {
        (**self).scan(limit, cursor)
    }
}
