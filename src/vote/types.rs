use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::review::{BookId, Review, UserId};
use crate::stats::StatsSummary;

pub const ADMIN_ROLE: &str = "admin";

/// The user a call is made on behalf of. Passed into every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub admin: bool,
}

impl Actor {
    pub fn user(user_id: UserId) -> Self {
        Actor {
            user_id,
            admin: false,
        }
    }

    pub fn admin(user_id: UserId) -> Self {
        Actor {
            user_id,
            admin: true,
        }
    }

    pub fn can_modify(&self, review: &Review) -> bool {
        self.admin || review.user_id == self.user_id
    }
}

/// A review merged with its book's rounded aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithStats {
    pub review_id: String,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_votes: u64,
    pub mean_rating: f64,
}

impl ReviewWithStats {
    pub fn new(review: Review, stats: StatsSummary) -> Self {
        ReviewWithStats {
            review_id: review.review_id,
            book_id: review.book_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
            total_votes: stats.total_votes,
            mean_rating: stats.mean_rating,
        }
    }

    pub fn stats(&self) -> StatsSummary {
        StatsSummary {
            total_votes: self.total_votes,
            mean_rating: self.mean_rating,
        }
    }
}

/// The newest reviews of a book together with its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReviews {
    pub reviews: Vec<Review>,
    pub total_votes: u64,
    pub mean_rating: f64,
}

/// One page of `scanReviews`.
///
/// `total_reviews` counts the reviews scanned to serve the request; the two keys
/// are opaque cursor tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total_reviews: usize,
    pub last_evaluated_key: Option<String>,
    pub first_evaluated_key: Option<String>,
}
