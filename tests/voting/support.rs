//! Engine builders, stats-store doubles, and the aggregate consistency check.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use bookshelf::review::{InMemoryReviewStore, NewReview};
use bookshelf::stats::{BookStats, BookStatsStore, InMemoryBookStatsStore, Versioned};
use bookshelf::{BookId, StoreError, VoteEngine};

pub type TestEngine = VoteEngine<InMemoryReviewStore, InMemoryBookStatsStore>;

pub fn engine() -> TestEngine {
    VoteEngine::new(InMemoryReviewStore::new(), InMemoryBookStatsStore::new())
}

pub fn vote(book_id: BookId, rating: u8) -> NewReview {
    NewReview {
        book_id,
        rating,
        comment: format!("rated this one a {}", rating),
    }
}

/// The stored aggregate matches the reviews actually stored for `book_id`.
pub fn assert_consistent<S: BookStatsStore>(
    reviews: &InMemoryReviewStore,
    stats: &S,
    book_id: BookId,
) {
    let ratings: Vec<u8> = reviews
        .all()
        .unwrap()
        .into_iter()
        .filter(|r| r.book_id == book_id)
        .map(|r| r.rating)
        .collect();
    let expected = BookStats::from_ratings(book_id, ratings);
    let stored = stats
        .get(book_id)
        .unwrap()
        .map(|v| v.data)
        .unwrap_or_else(|| BookStats::empty(book_id));

    assert_eq!(stored.total_votes, expected.total_votes, "count for book {}", book_id);
    assert_eq!(stored.rating_sum(), expected.rating_sum(), "sum for book {}", book_id);
}

/// Stats store that fails writes while `failing` is set.
#[derive(Clone, Default)]
pub struct FlakyStats {
    pub inner: InMemoryBookStatsStore,
    pub failing: Arc<AtomicBool>,
}

impl FlakyStats {
    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }
}

impl BookStatsStore for FlakyStats {
    fn get(&self, book_id: BookId) -> Result<Option<Versioned<BookStats>>, StoreError> {
        self.inner.get(book_id)
    }

    fn put(&self, stats: &BookStats) -> Result<u64, StoreError> {
        self.inner.put(stats)
    }

    fn put_if_version(&self, stats: &BookStats, expected: u64) -> Result<u64, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("stats table throttled".into()));
        }
        self.inner.put_if_version(stats, expected)
    }
}

/// Stats store where another writer bumps the version before each of the first
/// `races` conditional writes.
#[derive(Clone, Default)]
pub struct RacingStats {
    pub inner: InMemoryBookStatsStore,
    pub races: Arc<AtomicUsize>,
    pub attempts: Arc<AtomicUsize>,
}

impl RacingStats {
    pub fn with_races(races: usize) -> Self {
        let store = Self::default();
        store.races.store(races, Ordering::SeqCst);
        store
    }
}

impl BookStatsStore for RacingStats {
    fn get(&self, book_id: BookId) -> Result<Option<Versioned<BookStats>>, StoreError> {
        self.inner.get(book_id)
    }

    fn put(&self, stats: &BookStats) -> Result<u64, StoreError> {
        self.inner.put(stats)
    }

    fn put_if_version(&self, stats: &BookStats, expected: u64) -> Result<u64, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let raced = self
            .races
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if raced {
            // Rewrite the current value: same data, newer version.
            let current = self
                .inner
                .get(stats.book_id)?
                .map(|v| v.data)
                .unwrap_or_else(|| BookStats::empty(stats.book_id));
            self.inner.put(&current)?;
        }
        self.inner.put_if_version(stats, expected)
    }
}
