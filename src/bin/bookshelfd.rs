//! Review API process: command dispatch over HTTP, Redis for cache and queue.

use std::error::Error;
use std::sync::Arc;

use bookshelf::bus::RedisQueue;
use bookshelf::cache::RedisCache;
use bookshelf::review::InMemoryReviewStore;
use bookshelf::stats::InMemoryBookStatsStore;
use bookshelf::{handlers, microsvc, telemetry, App, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let level = std::env::var("RUST_LOG_LEVEL").unwrap_or_else(|_| "info".into());
    telemetry::init(&level)?;
    let config = Config::load()?;

    let queue = RedisQueue::open(&config.redis_url, config.queue_name.clone())?;
    let cache = RedisCache::open(&config.redis_url)?;

    let app = App::new(
        Arc::new(InMemoryReviewStore::new()),
        Arc::new(InMemoryBookStatsStore::new()),
        Arc::new(queue),
        Arc::new(cache),
    )
    .with_cas_retries(config.stats_cas_retries)
    .with_cache_ttl(config.cache_ttl);

    let service = Arc::new(handlers::service(app));
    info!(commands = ?service.commands(), "starting bookshelfd");
    microsvc::serve(service, &config.http_addr).await?;
    Ok(())
}
