//! Book review voting with incrementally maintained per-book rating stats.
//!
//! ```text
//!  review.create ─▶ VoteEngine ─┬─▶ ReviewStore      (one review per book+user)
//!                               ├─▶ BookStatsStore   ({totalVotes, meanRating}, CAS)
//!                               └─▶ ActivityNotifier ─▶ queue ─▶ ActivityConsumer ─▶ ActivityLogStore
//! ```
//!
//! The engine never recomputes an aggregate by scanning: each create, revote,
//! update or delete folds a [`stats::VoteDelta`] into the stored aggregate.
//! Reads go through a fail-open [`cache::CacheGateway`].

pub mod activity;
pub mod app;
pub mod bus;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod lock;
pub mod microsvc;
pub mod review;
pub mod stats;
pub mod telemetry;
pub mod vote;

pub use app::App;
pub use config::{Config, ConfigError};
pub use error::StoreError;
pub use review::{BookId, NewReview, Review, ReviewPatch, ReviewStore, UserId};
pub use stats::{BookStats, BookStatsStore, StatsSummary};
pub use vote::{Actor, VoteEngine, VoteError};
