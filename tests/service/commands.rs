use serde_json::json;

use crate::support::Harness;

#[test]
fn registers_every_command() {
    let harness = Harness::new();
    assert_eq!(
        harness.service.commands(),
        vec![
            "review.create",
            "review.get",
            "review.remove",
            "review.update",
            "reviews.byBook",
            "reviews.byUser",
            "reviews.page",
        ]
    );
}

#[test]
fn create_returns_review_merged_with_stats() {
    let harness = Harness::new();
    let body = harness
        .call(
            "review.create",
            json!({ "bookId": 1, "rating": 4, "comment": "  Loved the ending a lot  " }),
            Some(10),
        )
        .unwrap();

    assert_eq!(body["bookId"], 1);
    assert_eq!(body["userId"], 10);
    assert_eq!(body["rating"], 4);
    assert_eq!(body["comment"], "Loved the ending a lot");
    assert_eq!(body["totalVotes"], 1);
    assert_eq!(body["meanRating"], 4.0);
    assert!(body["reviewId"].is_string());
    assert!(body["createdAt"].is_string());
}

#[test]
fn full_lifecycle_emits_activity() {
    let harness = Harness::new();
    let created = harness
        .call(
            "review.create",
            json!({ "bookId": 2, "rating": 1, "comment": "Not for me, sadly." }),
            Some(3),
        )
        .unwrap();
    let id = created["reviewId"].as_str().unwrap().to_string();

    let updated = harness
        .call("review.update", json!({ "reviewId": id, "rating": 4 }), Some(3))
        .unwrap();
    assert_eq!(updated["rating"], 4);
    assert_eq!(updated["comment"], "Not for me, sadly.");

    let fetched = harness
        .call("review.get", json!({ "reviewId": id }), None)
        .unwrap();
    assert_eq!(fetched["meanRating"], 4.0);

    let removed = harness
        .call("review.remove", json!({ "reviewId": id }), Some(3))
        .unwrap();
    assert_eq!(removed, json!(true));

    let listing = harness
        .call("reviews.byBook", json!({ "bookId": 2 }), None)
        .unwrap();
    assert_eq!(listing["totalVotes"], 0);
    assert_eq!(listing["meanRating"], 0.0);

    assert_eq!(
        harness.drain_activity(),
        vec!["REVIEW_VOTED", "REVIEW_UPDATED", "REVIEW_REMOVED"]
    );
}

#[test]
fn by_user_and_paging() {
    let harness = Harness::new();
    for book in 0..5 {
        harness
            .call(
                "review.create",
                json!({ "bookId": book, "rating": 3, "comment": "Solid middle of the road" }),
                Some(8),
            )
            .unwrap();
    }

    let mine = harness
        .call("reviews.byUser", json!({ "userId": 8 }), None)
        .unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 5);

    let first = harness
        .call("reviews.page", json!({ "limit": 2 }), None)
        .unwrap();
    assert_eq!(first["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(first["totalReviews"], 2);
    let cursor = first["lastEvaluatedKey"].as_str().unwrap().to_string();

    let second = harness
        .call("reviews.page", json!({ "limit": 2, "cursor": cursor }), None)
        .unwrap();
    assert_eq!(second["reviews"].as_array().unwrap().len(), 2);
    assert_ne!(second["reviews"][0]["reviewId"], first["reviews"][0]["reviewId"]);

    let numbered = harness
        .call("reviews.page", json!({ "limit": 2, "page": 2, "offset": 1 }), None)
        .unwrap();
    let window = numbered["reviews"].as_array().unwrap();
    assert_eq!(window.len(), 2);
}

#[test]
fn admin_may_remove_anyones_review() {
    let harness = Harness::new();
    let created = harness
        .call(
            "review.create",
            json!({ "bookId": 9, "rating": 0, "comment": "Spam spam spam spam" }),
            Some(5),
        )
        .unwrap();

    let removed = harness
        .call_as_admin("review.remove", json!({ "reviewId": created["reviewId"] }), 1)
        .unwrap();
    assert_eq!(removed, json!(true));
    assert!(harness.reviews.is_empty());
}
