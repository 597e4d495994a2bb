//! Per-book rating aggregates.
//!
//! A [`BookStats`] record holds `{totalVotes, meanRating}` for one book and is only
//! ever changed by applying a [`VoteDelta`]. The sum of ratings is implied by
//! `meanRating * totalVotes` and never stored on its own.
//!
//! Records are [`Versioned`] so writers can compare-and-swap through
//! [`BookStatsStore::put_if_version`].

mod delta;
mod in_memory;
mod model;
mod store;

pub use delta::VoteDelta;
pub use in_memory::InMemoryBookStatsStore;
pub use model::{round_rating, BookStats, StatsSummary};
pub use store::BookStatsStore;

/// A stored value paired with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}
