//! Message queue abstractions.
//!
//! ```text
//! ┌──────────────────┐  publish   ┌───────────────┐  poll/ack   ┌──────────────────┐
//! │ ActivityNotifier │ ─────────▶ │     queue     │ ──────────▶ │ ActivityConsumer │
//! └──────────────────┘            └───────────────┘             └──────────────────┘
//!                                   │          │
//!                          InMemoryQueue    RedisQueue (feature "redis")
//! ```
//!
//! A polled message stays in flight until it is acknowledged. `RedisQueue`
//! returns stale in-flight messages to the queue on startup.

mod in_memory_queue;
mod publisher;
#[cfg(feature = "redis")]
mod redis_queue;

pub use in_memory_queue::InMemoryQueue;
pub use publisher::{Message, PublishError, Publisher, Subscriber};
#[cfg(feature = "redis")]
pub use redis_queue::RedisQueue;
