//! Count/sum invariants, uniqueness, idempotence, and zero handling.

use bookshelf::review::{ReviewPatch, ReviewStore};
use bookshelf::{Actor, VoteError};

use crate::support::{assert_consistent, engine, vote};

#[test]
fn mixed_sequence_keeps_aggregate_exact() {
    let engine = engine();
    let mut ids = Vec::new();

    for user in 0..20 {
        let book = user % 3;
        let rating = (user % 6) as u8;
        ids.push(engine.create_or_update_vote(&vote(book, rating), user).unwrap().review_id);
    }
    for user in (0..20).step_by(4) {
        let book = user % 3;
        engine.create_or_update_vote(&vote(book, 5), user).unwrap();
    }
    for id in ids.iter().skip(1).step_by(5) {
        engine
            .update(id, &ReviewPatch::rating(1), &Actor::admin(0))
            .unwrap();
    }
    for id in ids.iter().step_by(7) {
        engine.delete_by_id(id, &Actor::admin(0)).unwrap();
    }

    for book in 0..3 {
        assert_consistent(engine.reviews(), engine.stats_store(), book);
    }
}

#[test]
fn one_review_per_book_and_user() {
    let engine = engine();
    for rating in [1, 2, 3, 4, 5, 0] {
        engine.create_or_update_vote(&vote(7, rating), 42).unwrap();
    }

    let mine: Vec<_> = engine
        .reviews()
        .list_by_user_id(42, 100)
        .unwrap()
        .into_iter()
        .filter(|r| r.book_id == 7)
        .collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].rating, 0);
    assert_eq!(engine.book_stats(7).unwrap().total_votes, 1);
}

#[test]
fn repeating_a_vote_changes_nothing() {
    let engine = engine();
    engine.create_or_update_vote(&vote(3, 2), 9).unwrap();
    let first = engine.create_or_update_vote(&vote(3, 4), 10).unwrap();
    let again = engine.create_or_update_vote(&vote(3, 4), 10).unwrap();

    assert_eq!(first.review_id, again.review_id);
    assert_eq!(first.stats(), again.stats());
    assert_eq!(again.total_votes, 2);
    assert_eq!(again.mean_rating, 3.0);
}

#[test]
fn removing_last_review_gives_exact_zero() {
    let engine = engine();
    let review = engine.create_or_update_vote(&vote(5, 3), 1).unwrap();
    engine.delete_by_id(&review.review_id, &Actor::user(1)).unwrap();

    let stats = engine.book_stats(5).unwrap();
    assert_eq!(stats.total_votes, 0);
    assert_eq!(stats.mean_rating, 0.0);
    assert!(stats.mean_rating.is_sign_positive());
    assert!(!stats.mean_rating.is_nan());

    // The book can be voted on again afterwards.
    let back = engine.create_or_update_vote(&vote(5, 1), 1).unwrap();
    assert_eq!(back.stats().total_votes, 1);
}

#[test]
fn boundary_ratings() {
    let engine = engine();
    engine.create_or_update_vote(&vote(8, 0), 1).unwrap();
    let both = engine.create_or_update_vote(&vote(8, 5), 2).unwrap();
    assert_eq!(both.mean_rating, 2.5);

    let zero_only = engine.create_or_update_vote(&vote(9, 0), 1).unwrap();
    assert_eq!(zero_only.total_votes, 1);
    assert_eq!(zero_only.mean_rating, 0.0);
}

#[test]
fn mean_round_trips_at_two_decimals() {
    let engine = engine();
    let ratings = [5, 4, 4, 1, 3, 2, 5];
    for (user, rating) in ratings.iter().enumerate() {
        engine
            .create_or_update_vote(&vote(12, *rating), user as i64)
            .unwrap();
    }
    let exact = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
    let reported = engine.book_stats(12).unwrap().mean_rating;
    assert!((reported - exact).abs() <= 0.005);
}

#[test]
fn missing_review_is_not_found_everywhere() {
    let engine = engine();
    let id = "5b0c39b4-3a5e-4f6f-9a8e-9d0e1f2a3b4c";
    let admin = Actor::admin(1);

    assert!(matches!(
        engine.update(id, &ReviewPatch::rating(2), &admin),
        Err(VoteError::NotFound { .. })
    ));
    assert!(matches!(
        engine.delete_by_id(id, &admin),
        Err(VoteError::NotFound { .. })
    ));
    assert!(matches!(
        engine.find_by_review_id(id),
        Err(VoteError::NotFound { .. })
    ));
}

#[test]
fn only_owner_or_admin_may_edit() {
    let engine = engine();
    let review = engine.create_or_update_vote(&vote(2, 4), 1).unwrap();

    let err = engine
        .update(&review.review_id, &ReviewPatch::rating(0), &Actor::user(2))
        .unwrap_err();
    assert!(matches!(err, VoteError::Forbidden { .. }));
    assert_eq!(engine.book_stats(2).unwrap().mean_rating, 4.0);

    engine
        .update(&review.review_id, &ReviewPatch::rating(0), &Actor::admin(2))
        .unwrap();
    assert_eq!(engine.book_stats(2).unwrap().mean_rating, 0.0);
}
