use serde_json::json;

use bookshelf::cache::keys;

use crate::support::Harness;

#[test]
fn reads_populate_cache_and_writes_invalidate() {
    let harness = Harness::new();
    let created = harness
        .call(
            "review.create",
            json!({ "bookId": 6, "rating": 2, "comment": "Dragged in the middle" }),
            Some(1),
        )
        .unwrap();
    let id = created["reviewId"].as_str().unwrap().to_string();

    harness.call("review.get", json!({ "reviewId": id }), None).unwrap();
    harness.call("reviews.byBook", json!({ "bookId": 6 }), None).unwrap();
    harness
        .call("reviews.page", json!({ "limit": 10 }), None)
        .unwrap();

    assert!(harness.cache.contains(&keys::review(&id)));
    assert!(harness.cache.contains(&keys::book_reviews(6)));
    assert!(harness.cache.contains(&keys::review_page(None, 10, None)));

    harness
        .call("review.update", json!({ "reviewId": id, "rating": 5 }), Some(1))
        .unwrap();

    assert!(!harness.cache.contains(&keys::review(&id)));
    assert!(!harness.cache.contains(&keys::book_reviews(6)));
    assert!(!harness.cache.contains(&keys::review_page(None, 10, None)));

    let listing = harness
        .call("reviews.byBook", json!({ "bookId": 6 }), None)
        .unwrap();
    assert_eq!(listing["meanRating"], 5.0);
}

#[test]
fn cursor_pages_bypass_cache() {
    let harness = Harness::new();
    for user in 0..3 {
        harness
            .call(
                "review.create",
                json!({ "bookId": 1, "rating": 4, "comment": "Would read again" }),
                Some(user),
            )
            .unwrap();
    }
    let first = harness
        .call("reviews.page", json!({ "limit": 1 }), None)
        .unwrap();
    let before = harness.cache.keys().len();

    harness
        .call(
            "reviews.page",
            json!({ "limit": 1, "cursor": first["lastEvaluatedKey"] }),
            None,
        )
        .unwrap();
    assert_eq!(harness.cache.keys().len(), before);
}
