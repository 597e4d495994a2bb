//! Cache key layout.

use crate::review::{BookId, UserId};

/// Prefix shared by every review listing key.
pub const REVIEWS_PREFIX: &str = "reviews:";

/// A single review with its book stats.
pub fn review(review_id: &str) -> String {
    format!("book:{}", review_id)
}

/// A page of the full review scan. Missing values render as `undefined`.
pub fn review_page(page: Option<usize>, limit: usize, offset: Option<usize>) -> String {
    format!(
        "{}{}:{}:{}",
        REVIEWS_PREFIX,
        or_undefined(page),
        limit,
        or_undefined(offset)
    )
}

pub fn book_reviews(book_id: BookId) -> String {
    format!("{}bookId:{}", REVIEWS_PREFIX, book_id)
}

pub fn user_reviews(user_id: UserId) -> String {
    format!("{}userId:{}", REVIEWS_PREFIX, user_id)
}

fn or_undefined(value: Option<usize>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| v.to_string())
}
