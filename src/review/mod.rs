//! Reviews: one record per (book, user) vote.
//!
//! The [`ReviewStore`] trait is the boundary to the key-value store that holds
//! review records, with `reviewId` as the primary key and secondary query paths by
//! book and by user. [`InMemoryReviewStore`] backs tests and single-process use.

mod cursor;
mod in_memory;
mod input;
mod model;
mod store;

pub use cursor::{CursorError, ScanCursor};
pub use in_memory::InMemoryReviewStore;
pub use input::{
    parse_rating, validate_comment, validate_rating, validate_review_id, InputError, MAX_COMMENT_LEN,
    MAX_RATING, MIN_COMMENT_LEN,
};
pub use model::{BookId, NewReview, Review, ReviewPatch, UserId};
pub use store::{ReviewStore, ScanPage, DEFAULT_PAGE_SIZE};
