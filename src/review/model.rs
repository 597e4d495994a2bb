use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BookId = i64;
pub type UserId = i64;

/// A single user's vote (rating + comment) on a single book.
///
/// `book_id` and `user_id` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: String,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Build a fresh review with a new v4 id, stamped now.
    pub fn create(new: NewReview, user_id: UserId) -> Self {
        let now = Utc::now();
        Review {
            review_id: Uuid::new_v4().to_string(),
            book_id: new.book_id,
            user_id,
            rating: new.rating,
            comment: new.comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Vote input: `createReviewInput` minus the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: BookId,
    pub rating: u8,
    pub comment: String,
}

/// The mutable part of a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewPatch {
    pub fn rating(rating: u8) -> Self {
        ReviewPatch {
            rating: Some(rating),
            comment: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.comment.is_none()
    }

    /// Merge into `review`, stamping `updated_at`.
    pub fn apply_to(&self, review: &mut Review, now: DateTime<Utc>) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(comment) = &self.comment {
            review.comment = comment.clone();
        }
        review.updated_at = now;
    }
}

impl From<&NewReview> for ReviewPatch {
    fn from(input: &NewReview) -> Self {
        ReviewPatch {
            rating: Some(input.rating),
            comment: Some(input.comment.clone()),
        }
    }
}
