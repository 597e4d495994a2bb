//! User activity logging.
//!
//! The API process emits activity events onto a queue through an
//! [`ActivityNotifier`]. A separate consumer process drains the queue with an
//! [`ActivityConsumer`], usually driven by a [`ConsumerThread`], and writes each
//! drained batch to an [`ActivityLogStore`] in one call.

mod consumer;
mod error;
mod file_store;
mod in_memory;
mod notifier;
mod store;
mod types;
mod worker;

pub use consumer::{ActivityConsumer, DrainResult, DEFAULT_BATCH_SIZE};
pub use error::ConsumerError;
pub use file_store::FileActivityLogStore;
pub use in_memory::InMemoryActivityLogStore;
pub use notifier::ActivityNotifier;
pub use store::{ActivityLogStore, TYPE_QUERY_LIMIT, USER_QUERY_LIMIT};
pub use types::{ActivityEnvelope, ActivityLog, ActivityPayload, ActivityType, USER_ACTIVITY};
pub use worker::{ConsumerStats, ConsumerThread};
