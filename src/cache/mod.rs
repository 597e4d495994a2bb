//! Read-through cache in front of the review queries.
//!
//! Never authoritative: every entry has a TTL, mutations invalidate what they
//! touch, and any cache failure is treated as a miss.

mod error;
mod gateway;
mod in_memory;
pub mod keys;
#[cfg(feature = "redis")]
mod redis_cache;
mod store;

pub use error::CacheError;
pub use gateway::{CacheGateway, DEFAULT_TTL};
pub use in_memory::InMemoryCache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;
pub use store::CacheStore;
