//! Shared state handed to every command handler.

use std::sync::Arc;
use std::time::Duration;

use crate::activity::ActivityNotifier;
use crate::bus::{InMemoryQueue, Publisher};
use crate::cache::{CacheGateway, CacheStore, InMemoryCache};
use crate::review::{InMemoryReviewStore, ReviewStore};
use crate::stats::{BookStatsStore, InMemoryBookStatsStore};
use crate::vote::VoteEngine;

pub type Engine = VoteEngine<Arc<dyn ReviewStore>, Arc<dyn BookStatsStore>>;

pub struct App {
    engine: Engine,
    notifier: ActivityNotifier<Arc<dyn Publisher>>,
    cache: CacheGateway<Arc<dyn CacheStore>>,
}

impl App {
    pub fn new(
        reviews: Arc<dyn ReviewStore>,
        stats: Arc<dyn BookStatsStore>,
        publisher: Arc<dyn Publisher>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            engine: VoteEngine::new(reviews, stats),
            notifier: ActivityNotifier::new(publisher),
            cache: CacheGateway::new(cache),
        }
    }

    /// Everything in process memory.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryReviewStore::new()),
            Arc::new(InMemoryBookStatsStore::new()),
            Arc::new(InMemoryQueue::new()),
            Arc::new(InMemoryCache::new()),
        )
    }

    pub fn with_cas_retries(mut self, retries: u32) -> Self {
        self.engine = self.engine.with_cas_retries(retries);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = CacheGateway::with_ttl(Arc::clone(self.cache.store()), ttl);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn notifier(&self) -> &ActivityNotifier<Arc<dyn Publisher>> {
        &self.notifier
    }

    pub fn cache(&self) -> &CacheGateway<Arc<dyn CacheStore>> {
        &self.cache
    }
}
