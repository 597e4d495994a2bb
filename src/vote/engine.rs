use tracing::{debug, error, info, instrument, warn};

use super::{Actor, BookReviews, ReviewPage, ReviewWithStats, VoteError};
use crate::error::StoreError;
use crate::lock::{InMemoryLockManager, LockGuard, LockManager};
use crate::review::{
    BookId, NewReview, Review, ReviewPatch, ReviewStore, ScanCursor, UserId, DEFAULT_PAGE_SIZE,
};
use crate::stats::{BookStats, BookStatsStore, StatsSummary, VoteDelta};

/// Attempts at the aggregate compare-and-swap before giving up.
pub const DEFAULT_CAS_RETRIES: u32 = 5;

/// Log target for review/aggregate divergence that needs [`VoteEngine::reconcile`].
pub const RECONCILE_TARGET: &str = "bookshelf::reconcile";

/// Applies votes to a review store and keeps each book's aggregate in step.
pub struct VoteEngine<R, S, L = InMemoryLockManager> {
    reviews: R,
    stats: S,
    locks: L,
    cas_retries: u32,
}

impl<R: ReviewStore, S: BookStatsStore> VoteEngine<R, S> {
    pub fn new(reviews: R, stats: S) -> Self {
        Self::with_lock_manager(reviews, stats, InMemoryLockManager::new())
    }
}

impl<R, S, L> VoteEngine<R, S, L>
where
    R: ReviewStore,
    S: BookStatsStore,
    L: LockManager,
{
    pub fn with_lock_manager(reviews: R, stats: S, locks: L) -> Self {
        VoteEngine {
            reviews,
            stats,
            locks,
            cas_retries: DEFAULT_CAS_RETRIES,
        }
    }

    pub fn with_cas_retries(mut self, retries: u32) -> Self {
        self.cas_retries = retries.max(1);
        self
    }

    pub fn reviews(&self) -> &R {
        &self.reviews
    }

    pub fn stats_store(&self) -> &S {
        &self.stats
    }

    /// Record `user_id`'s vote on a book: a new review on the first vote, an
    /// in-place update on every later one.
    #[instrument(skip(self, input), fields(book_id = input.book_id))]
    pub fn create_or_update_vote(
        &self,
        input: &NewReview,
        user_id: UserId,
    ) -> Result<ReviewWithStats, VoteError> {
        let book_id = input.book_id;
        let _guard = self.lock_book(book_id)?;

        let existing = self
            .reviews
            .get_by_book_and_user(book_id, user_id)
            .map_err(VoteError::internal("find existing vote", book_id))?;

        let (review, delta) = match existing {
            Some(previous) => self.revote(previous, input)?,
            None => {
                let review = Review::create(input.clone(), user_id);
                match self.reviews.insert(&review) {
                    Ok(()) => {
                        let rating = review.rating;
                        (review, VoteDelta::Add { rating })
                    }
                    // Another process inserted first; fold into its record.
                    Err(StoreError::Duplicate { .. }) => {
                        let previous = self
                            .reviews
                            .get_by_book_and_user(book_id, user_id)
                            .map_err(VoteError::internal("find existing vote", book_id))?
                            .ok_or_else(|| VoteError::not_found(&review.review_id))?;
                        self.revote(previous, input)?
                    }
                    Err(err) => {
                        return Err(VoteError::internal("insert review", &review.review_id)(err))
                    }
                }
            }
        };

        let stats = self.apply_delta(book_id, delta, &review.review_id)?;
        debug!(review_id = %review.review_id, ?delta, "vote recorded");
        Ok(ReviewWithStats::new(review, stats.summary()))
    }

    fn revote(&self, previous: Review, input: &NewReview) -> Result<(Review, VoteDelta), VoteError> {
        let updated = self
            .reviews
            .update(&previous.review_id, &ReviewPatch::from(input))
            .map_err(VoteError::internal("update review", &previous.review_id))?
            .ok_or_else(|| VoteError::not_found(&previous.review_id))?;
        let delta = VoteDelta::Update {
            old: previous.rating,
            new: updated.rating,
        };
        Ok((updated, delta))
    }

    /// Edit rating and/or comment of an existing review.
    #[instrument(skip(self, patch, actor), fields(user_id = actor.user_id))]
    pub fn update(
        &self,
        review_id: &str,
        patch: &ReviewPatch,
        actor: &Actor,
    ) -> Result<Review, VoteError> {
        let book_id = self.owned_review(review_id, actor)?.book_id;
        let _guard = self.lock_book(book_id)?;

        // Re-read under the lock; the rating may have moved since.
        let current = self.fetch(review_id)?;
        let updated = self
            .reviews
            .update(review_id, patch)
            .map_err(VoteError::internal("update review", review_id))?
            .ok_or_else(|| VoteError::not_found(review_id))?;

        if let Some(new) = patch.rating {
            let delta = VoteDelta::Update {
                old: current.rating,
                new,
            };
            self.apply_delta(book_id, delta, review_id)?;
        }
        Ok(updated)
    }

    /// Remove a review and retract its rating from the aggregate.
    #[instrument(skip(self, actor), fields(user_id = actor.user_id))]
    pub fn delete_by_id(&self, review_id: &str, actor: &Actor) -> Result<bool, VoteError> {
        let book_id = self.owned_review(review_id, actor)?.book_id;
        let _guard = self.lock_book(book_id)?;

        let current = self.fetch(review_id)?;
        let removed = self
            .reviews
            .delete_by_id(review_id)
            .map_err(VoteError::internal("delete review", review_id))?;
        if !removed {
            return Err(VoteError::not_found(review_id));
        }

        self.apply_delta(
            book_id,
            VoteDelta::Subtract {
                rating: current.rating,
            },
            review_id,
        )?;
        Ok(true)
    }

    pub fn find_by_review_id(&self, review_id: &str) -> Result<ReviewWithStats, VoteError> {
        let review = self.fetch(review_id)?;
        let stats = self.book_stats(review.book_id)?;
        Ok(ReviewWithStats::new(review, stats))
    }

    /// The book's newest reviews with its rounded aggregate.
    pub fn find_by_book_id(&self, book_id: BookId) -> Result<BookReviews, VoteError> {
        let reviews = self
            .reviews
            .list_by_book_id(book_id, DEFAULT_PAGE_SIZE)
            .map_err(VoteError::internal("list reviews by book", book_id))?;
        let stats = self.book_stats(book_id)?;
        Ok(BookReviews {
            reviews,
            total_votes: stats.total_votes,
            mean_rating: stats.mean_rating,
        })
    }

    pub fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Review>, VoteError> {
        self.reviews
            .list_by_user_id(user_id, DEFAULT_PAGE_SIZE)
            .map_err(VoteError::internal("list reviews by user", user_id))
    }

    /// Rounded aggregate for a book; the zero aggregate if it has no record.
    pub fn book_stats(&self, book_id: BookId) -> Result<StatsSummary, VoteError> {
        Ok(self
            .stats
            .get(book_id)
            .map_err(VoteError::internal("read book stats", book_id))?
            .map(|v| v.data.summary())
            .unwrap_or(StatsSummary::EMPTY))
    }

    /// Scan all reviews.
    ///
    /// With both `page` (1-based) and `offset` non-zero, scans until
    /// `limit * page + offset` reviews are collected and returns
    /// `[(page - 1) * limit + offset, page * limit + offset)`.
    /// Otherwise returns the first `limit` reviews.
    pub fn scan_reviews(
        &self,
        limit: usize,
        page: Option<usize>,
        offset: Option<usize>,
    ) -> Result<ReviewPage, VoteError> {
        if limit == 0 {
            return Err(VoteError::BadInput("limit must be positive".into()));
        }

        let (page, offset) = match (page, offset) {
            (Some(page), Some(offset)) if page > 0 && offset > 0 => (page, offset),
            _ => return self.scan_after(limit, None),
        };

        let out_of_range = || VoteError::BadInput("page window out of range".into());
        let target = limit
            .checked_mul(page)
            .and_then(|n| n.checked_add(offset))
            .ok_or_else(out_of_range)?;
        let first = (page - 1)
            .checked_mul(limit)
            .and_then(|n| n.checked_add(offset))
            .ok_or_else(out_of_range)?;
        let mut collected: Vec<Review> = Vec::new();
        let mut cursor: Option<ScanCursor> = None;
        while collected.len() < target {
            let batch = self
                .reviews
                .scan(limit, cursor.as_ref())
                .map_err(VoteError::internal("scan reviews", "all"))?;
            collected.extend(batch.reviews);
            cursor = batch.last_evaluated_key;
            if cursor.is_none() {
                break;
            }
        }

        let total_reviews = collected.len();
        let start = first.min(total_reviews);
        let end = target.min(total_reviews);
        let reviews: Vec<Review> = collected.drain(start..end).collect();

        Ok(page_of(reviews, total_reviews, cursor))
    }

    /// Resume a scan from an opaque cursor token.
    pub fn scan_after(&self, limit: usize, token: Option<&str>) -> Result<ReviewPage, VoteError> {
        if limit == 0 {
            return Err(VoteError::BadInput("limit must be positive".into()));
        }
        let cursor = token
            .map(ScanCursor::decode)
            .transpose()
            .map_err(|err| VoteError::BadInput(err.to_string()))?;

        let batch = self
            .reviews
            .scan(limit, cursor.as_ref())
            .map_err(VoteError::internal("scan reviews", token.unwrap_or("start")))?;
        let total = batch.reviews.len();
        Ok(page_of(batch.reviews, total, batch.last_evaluated_key))
    }

    /// Rebuild a book's aggregate from the reviews currently stored for it.
    ///
    /// Operator tool for the case where a review write succeeded but the aggregate
    /// write after it failed. Not part of any normal request path.
    #[instrument(skip(self))]
    pub fn reconcile(&self, book_id: BookId) -> Result<StatsSummary, VoteError> {
        let _guard = self.lock_book(book_id)?;

        let mut ratings = Vec::new();
        let mut cursor: Option<ScanCursor> = None;
        loop {
            let batch = self
                .reviews
                .scan(DEFAULT_PAGE_SIZE * 10, cursor.as_ref())
                .map_err(VoteError::internal("scan reviews", book_id))?;
            ratings.extend(
                batch
                    .reviews
                    .iter()
                    .filter(|r| r.book_id == book_id)
                    .map(|r| r.rating),
            );
            cursor = batch.last_evaluated_key;
            if cursor.is_none() {
                break;
            }
        }

        let rebuilt = BookStats::from_ratings(book_id, ratings);
        self.stats
            .put(&rebuilt)
            .map_err(VoteError::internal("write book stats", book_id))?;
        info!(
            target: RECONCILE_TARGET,
            book_id,
            total_votes = rebuilt.total_votes,
            "aggregate rebuilt from reviews"
        );
        Ok(rebuilt.summary())
    }

    fn lock_book(&self, book_id: BookId) -> Result<LockGuard<L::Lock>, VoteError> {
        Ok(self.locks.acquire(&format!("book:{}", book_id))?)
    }

    fn fetch(&self, review_id: &str) -> Result<Review, VoteError> {
        self.reviews
            .get_by_id(review_id)
            .map_err(VoteError::internal("get review", review_id))?
            .ok_or_else(|| VoteError::not_found(review_id))
    }

    fn owned_review(&self, review_id: &str, actor: &Actor) -> Result<Review, VoteError> {
        let review = self.fetch(review_id)?;
        if !actor.can_modify(&review) {
            warn!(review_id, owner = review.user_id, "review mutation refused");
            return Err(VoteError::Forbidden {
                review_id: review_id.to_string(),
                user_id: actor.user_id,
            });
        }
        Ok(review)
    }

    /// Read-modify-write of the aggregate with a version check, retried on conflict.
    ///
    /// The review write has already happened when this runs, so any failure here
    /// leaves the pair diverged and is logged on [`RECONCILE_TARGET`].
    fn apply_delta(
        &self,
        book_id: BookId,
        delta: VoteDelta,
        review_id: &str,
    ) -> Result<BookStats, VoteError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self.stats.get(book_id).and_then(|current| {
                let (base, version) = match current {
                    Some(v) => (v.data, v.version),
                    None => (BookStats::empty(book_id), 0),
                };
                if delta.is_noop() {
                    return Ok(base);
                }
                let next = base.apply(delta);
                self.stats.put_if_version(&next, version).map(|_| next)
            });

            match result {
                Ok(stats) => return Ok(stats),
                Err(err) if err.is_conflict() && attempt < self.cas_retries => {
                    debug!(book_id, attempt, "aggregate version moved; retrying");
                }
                Err(err) => {
                    error!(
                        target: RECONCILE_TARGET,
                        book_id,
                        review_id,
                        ?delta,
                        error = %err,
                        "review written but aggregate update failed"
                    );
                    return Err(VoteError::internal("update book stats", book_id)(err));
                }
            }
        }
    }
}

fn page_of(reviews: Vec<Review>, total_reviews: usize, last: Option<ScanCursor>) -> ReviewPage {
    let first_evaluated_key = reviews.first().map(|r| ScanCursor::after(r).encode());
    ReviewPage {
        reviews,
        total_reviews,
        last_evaluated_key: last.map(|c| c.encode()),
        first_evaluated_key,
    }
}
