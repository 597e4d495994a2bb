//! Drains the activity queue into the JSON-lines activity log on an interval.

use std::error::Error;

use bookshelf::activity::{ActivityConsumer, ConsumerThread, FileActivityLogStore};
use bookshelf::bus::RedisQueue;
use bookshelf::{telemetry, Config};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let level = std::env::var("RUST_LOG_LEVEL").unwrap_or_else(|_| "info".into());
    telemetry::init(&level)?;
    let config = Config::load()?;

    if !config.start_consumer {
        warn!("START_CONSUMER is false; exiting");
        return Ok(());
    }

    let queue = RedisQueue::open(&config.redis_url, config.queue_name.clone())?;
    let requeued = queue.requeue_stale()?;
    if requeued > 0 {
        info!(requeued, "returned unacked messages to the queue");
    }

    let store = FileActivityLogStore::new(&config.activity_log_path);
    let consumer = ActivityConsumer::new(queue, store).with_batch_size(config.consumer_batch_size);

    let stats = ConsumerThread::spawn(consumer, config.consumption_interval).wait();
    info!(?stats, "consumer exited");
    Ok(())
}
