//! Activity pipeline: notifier -> queue -> consumer -> activity log.


use std::sync::Arc;
use std::time::Duration;

use bookshelf::activity::{
    ActivityConsumer, ActivityLogStore, ActivityType, ConsumerThread, FileActivityLogStore,
    DEFAULT_BATCH_SIZE, USER_QUERY_LIMIT,
};
use bookshelf::bus::{Message, Publisher};
use chrono::{Duration as ChronoDuration, Utc};

use support::{pipeline, Pipeline};

#[test]
fn drains_up_to_one_batch_per_run() {
    let Pipeline { notifier, queue, logs } = pipeline();
    for user in 0..30 {
        notifier.notify(ActivityType::ReviewVoted, user);
    }

    let consumer = ActivityConsumer::new(queue.clone(), logs.clone()).with_wait_ms(0);
    let first = consumer.run_once().unwrap();
    assert_eq!(first.received, DEFAULT_BATCH_SIZE);
    assert_eq!(first.logged, DEFAULT_BATCH_SIZE);
    assert_eq!(logs.batches_written(), 1);
    assert_eq!(queue.len(), 5);
    assert_eq!(queue.in_flight(), 0);

    let second = consumer.run_once().unwrap();
    assert_eq!(second.logged, 5);
    assert_eq!(logs.batches_written(), 2);
    assert_eq!(logs.len(), 30);
}

#[test]
fn empty_queue_writes_nothing() {
    let Pipeline { queue, logs, .. } = pipeline();
    let consumer = ActivityConsumer::new(queue, logs.clone()).with_wait_ms(0);

    let result = consumer.run_once().unwrap();
    assert_eq!(result.received, 0);
    assert_eq!(logs.batches_written(), 0);
}

#[test]
fn junk_messages_are_acked_and_skipped() {
    let Pipeline { notifier, queue, logs } = pipeline();
    notifier.notify(ActivityType::UserSignin, 1);
    queue.publish(Message::new("junk-1", "not json")).unwrap();
    queue
        .publish(Message::new(
            "junk-2",
            r#"{"type":"bookactivity","payload":{"userId":1,"activityType":"BOOK_CREATED","timestamp":"2024-01-01T00:00:00Z"}}"#,
        ))
        .unwrap();
    notifier.notify(ActivityType::BookDeleted, 2);

    let consumer = ActivityConsumer::new(queue.clone(), logs.clone()).with_wait_ms(0);
    let result = consumer.run_once().unwrap();

    assert_eq!(result.received, 4);
    assert_eq!(result.logged, 2);
    assert_eq!(result.skipped, 2);
    assert!(queue.is_empty());
    assert_eq!(queue.acknowledged().len(), 4);

    let kinds: Vec<ActivityType> = logs.records().into_iter().map(|l| l.activity_type).collect();
    assert_eq!(kinds, vec![ActivityType::UserSignin, ActivityType::BookDeleted]);
}

#[test]
fn unknown_activity_types_are_kept() {
    let Pipeline { queue, logs, .. } = pipeline();
    queue
        .publish(Message::new(
            "m-1",
            r#"{"type":"useractivity","payload":{"userId":7,"activityType":"SHELF_SHARED","timestamp":"2024-01-01T00:00:00Z"}}"#,
        ))
        .unwrap();

    ActivityConsumer::new(queue, logs.clone())
        .with_wait_ms(0)
        .run_once()
        .unwrap();
    let records = logs.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].activity_type, ActivityType::Other("SHELF_SHARED".into()));
    assert_eq!(records[0].user_id, 7);
}

#[test]
fn file_log_survives_reopen_and_answers_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    let Pipeline { notifier, queue, .. } = pipeline();

    let start = Utc::now() - ChronoDuration::seconds(1);
    for _ in 0..12 {
        notifier.notify(ActivityType::ReviewVoted, 42);
    }
    notifier.notify(ActivityType::UserSignup, 43);

    let store = Arc::new(FileActivityLogStore::new(&path));
    let result = ActivityConsumer::new(queue, store)
        .with_wait_ms(0)
        .run_once()
        .unwrap();
    assert_eq!(result.logged, 13);

    let reopened = FileActivityLogStore::new(&path);
    let mine = reopened.list_by_user(42).unwrap();
    assert_eq!(mine.len(), USER_QUERY_LIMIT);
    assert!(mine.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let signups = reopened
        .list_by_type_since(&ActivityType::UserSignup, start)
        .unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0].user_id, 43);

    let removed = reopened
        .remove_by_type_before(&ActivityType::ReviewVoted, Utc::now() + ChronoDuration::seconds(1))
        .unwrap();
    assert_eq!(removed, 12);
    assert!(reopened.list_by_user(42).unwrap().is_empty());
}

#[test]
fn consumer_thread_runs_immediately_then_stops() {
    let Pipeline { notifier, queue, logs } = pipeline();
    notifier.notify(ActivityType::ReviewRemoved, 5);

    let consumer = ActivityConsumer::new(queue.clone(), logs.clone()).with_wait_ms(0);
    let worker = ConsumerThread::spawn(consumer, Duration::from_secs(3600));

    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while logs.is_empty() && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }

    let stats = worker.stop();
    assert_eq!(stats.runs, 1);
    assert_eq!(stats.logged, 1);
    assert_eq!(stats.failed_runs, 0);
    assert!(queue.is_empty());
}
