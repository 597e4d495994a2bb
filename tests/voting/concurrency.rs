//! Many threads voting on one book.

use std::sync::Arc;
use std::thread;

use bookshelf::Actor;

use crate::support::{assert_consistent, engine, vote};

#[test]
fn parallel_first_votes_are_all_counted() {
    let engine = Arc::new(engine());

    let handles: Vec<_> = (0..16)
        .map(|user| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .create_or_update_vote(&vote(1, (user % 6) as u8), user)
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = engine.book_stats(1).unwrap();
    assert_eq!(stats.total_votes, 16);
    assert_consistent(engine.reviews(), engine.stats_store(), 1);
}

#[test]
fn same_user_racing_creates_one_review() {
    let engine = Arc::new(engine());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .create_or_update_vote(&vote(2, (i % 5) as u8), 77)
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.reviews().len(), 1);
    assert_eq!(engine.book_stats(2).unwrap().total_votes, 1);
    assert_consistent(engine.reviews(), engine.stats_store(), 2);
}

#[test]
fn interleaved_mutations_stay_consistent() {
    let engine = Arc::new(engine());
    let ids: Vec<String> = (0..10)
        .map(|user| {
            engine
                .create_or_update_vote(&vote(3, 3), user)
                .unwrap()
                .review_id
        })
        .collect();

    let handles: Vec<_> = ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                if i % 2 == 0 {
                    engine.delete_by_id(&id, &Actor::admin(0)).unwrap();
                } else {
                    engine.create_or_update_vote(&vote(3, 5), i as i64).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = engine.book_stats(3).unwrap();
    assert_eq!(stats.total_votes, 5);
    assert_eq!(stats.mean_rating, 5.0);
    assert_consistent(engine.reviews(), engine.stats_store(), 3);
}
