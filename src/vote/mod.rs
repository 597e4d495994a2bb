//! The vote engine: the only writer of book aggregates.
//!
//! Every review mutation goes through [`VoteEngine`], which writes the review
//! record and then folds the matching [`VoteDelta`](crate::stats::VoteDelta) into the
//! book's aggregate. The two records live in separate stores; the engine holds a
//! per-book lock around each mutation and writes the aggregate with a version check.

mod engine;
mod error;
mod types;

pub use engine::{VoteEngine, DEFAULT_CAS_RETRIES, RECONCILE_TARGET};
pub use error::VoteError;
pub use types::{Actor, BookReviews, ReviewPage, ReviewWithStats, ADMIN_ROLE};
