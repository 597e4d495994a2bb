//! A fully in-memory service with handles on every backend.

use std::sync::Arc;

use bookshelf::activity::ActivityEnvelope;
use bookshelf::bus::{InMemoryQueue, Subscriber};
use bookshelf::cache::InMemoryCache;
use bookshelf::handlers;
use bookshelf::microsvc::{HandlerError, Service, Session};
use bookshelf::review::{BookId, InMemoryReviewStore};
use bookshelf::stats::{BookStats, BookStatsStore, InMemoryBookStatsStore, Versioned};
use bookshelf::{App, StoreError};
use serde_json::Value;

pub struct Harness {
    pub service: Service<App>,
    pub reviews: InMemoryReviewStore,
    pub queue: InMemoryQueue,
    pub cache: InMemoryCache,
}

impl Harness {
    pub fn new() -> Self {
        let reviews = InMemoryReviewStore::new();
        let queue = InMemoryQueue::new();
        let cache = InMemoryCache::new();
        let app = App::new(
            Arc::new(reviews.clone()),
            Arc::new(InMemoryBookStatsStore::new()),
            Arc::new(queue.clone()),
            Arc::new(cache.clone()),
        );
        Self {
            service: handlers::service(app),
            reviews,
            queue,
            cache,
        }
    }

    pub fn call(&self, command: &str, input: Value, user: Option<i64>) -> Result<Value, HandlerError> {
        let session = match user {
            Some(id) => Session::for_user(id, None),
            None => Session::new(),
        };
        self.service.dispatch(command, input, session)
    }

    pub fn call_as_admin(&self, command: &str, input: Value, user: i64) -> Result<Value, HandlerError> {
        self.service
            .dispatch(command, input, Session::for_user(user, Some("admin")))
    }

    /// Activity types waiting on the queue, oldest first. Drains the queue.
    pub fn drain_activity(&self) -> Vec<String> {
        let mut kinds = Vec::new();
        while let Some(message) = self.queue.poll(0).unwrap() {
            self.queue.ack(&message.id).unwrap();
            let envelope: ActivityEnvelope = serde_json::from_str(&message.body).unwrap();
            kinds.push(envelope.payload.activity_type.to_string());
        }
        kinds
    }
}

/// Stats backend that is always down.
pub struct DownStats;

impl BookStatsStore for DownStats {
    fn get(&self, _book_id: BookId) -> Result<Option<Versioned<BookStats>>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn put(&self, _stats: &BookStats) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn put_if_version(&self, _stats: &BookStats, _expected: u64) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// A service whose stats store is unreachable.
pub fn degraded() -> Service<App> {
    handlers::service(App::new(
        Arc::new(InMemoryReviewStore::new()),
        Arc::new(DownStats),
        Arc::new(InMemoryQueue::new()),
        Arc::new(InMemoryCache::new()),
    ))
}
