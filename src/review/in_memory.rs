//! InMemoryReviewStore - HashMap-backed review table for tests and single-process use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::error::StoreError;

use super::{BookId, Review, ReviewPatch, ReviewStore, ScanCursor, ScanPage, UserId};

const COLLECTION: &str = "reviews";

#[derive(Default)]
struct Table {
    rows: HashMap<String, Review>,
    /// Unique index on (book, user); the one-vote-per-user-per-book constraint.
    by_book_user: HashMap<(BookId, UserId), String>,
}

impl Table {
    fn newest_first<'a>(&'a self, keep: impl Fn(&Review) -> bool + 'a) -> Vec<&'a Review> {
        let mut matching: Vec<&Review> = self.rows.values().filter(|r| keep(r)).collect();
        matching.sort_by(|a, b| {
            (b.created_at, b.review_id.as_str()).cmp(&(a.created_at, a.review_id.as_str()))
        });
        matching
    }
}

/// Review table held in memory. Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryReviewStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored review, in no particular order.
    pub fn all(&self) -> Result<Vec<Review>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(table.rows.values().cloned().collect())
    }
}

impl ReviewStore for InMemoryReviewStore {
    fn insert(&self, review: &Review) -> Result<(), StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let pair = (review.book_id, review.user_id);
        if table.by_book_user.contains_key(&pair) {
            return Err(StoreError::Duplicate {
                collection: COLLECTION,
                key: format!("book {} / user {}", review.book_id, review.user_id),
            });
        }
        if table.rows.contains_key(&review.review_id) {
            return Err(StoreError::Duplicate {
                collection: COLLECTION,
                key: review.review_id.clone(),
            });
        }

        table.by_book_user.insert(pair, review.review_id.clone());
        table.rows.insert(review.review_id.clone(), review.clone());
        Ok(())
    }

    fn update(&self, review_id: &str, patch: &ReviewPatch) -> Result<Option<Review>, StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        Ok(table.rows.get_mut(review_id).map(|review| {
            patch.apply_to(review, Utc::now());
            review.clone()
        }))
    }

    fn delete_by_id(&self, review_id: &str) -> Result<bool, StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        match table.rows.remove(review_id) {
            Some(review) => {
                table.by_book_user.remove(&(review.book_id, review.user_id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_by_id(&self, review_id: &str) -> Result<Option<Review>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(table.rows.get(review_id).cloned())
    }

    fn get_by_book_and_user(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<Review>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(table
            .by_book_user
            .get(&(book_id, user_id))
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    fn list_by_book_id(&self, book_id: BookId, limit: usize) -> Result<Vec<Review>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(table
            .newest_first(move |r| r.book_id == book_id)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    fn list_by_user_id(&self, user_id: UserId, limit: usize) -> Result<Vec<Review>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(table
            .newest_first(move |r| r.user_id == user_id)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    fn scan(&self, limit: usize, cursor: Option<&ScanCursor>) -> Result<ScanPage, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        let remaining = table.newest_first(|r| cursor.map_or(true, |c| c.precedes(r)));
        let has_more = remaining.len() > limit;
        let reviews: Vec<Review> = remaining.into_iter().take(limit).cloned().collect();
        let last_evaluated_key = if has_more {
            reviews.last().map(ScanCursor::after)
        } else {
            None
        };

        Ok(ScanPage {
            reviews,
            last_evaluated_key,
        })
    }
}
