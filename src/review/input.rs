//! Shape checks applied at the request boundary, before the vote engine runs.

use thiserror::Error;
use uuid::Uuid;

pub const MAX_RATING: u8 = 5;
pub const MIN_COMMENT_LEN: usize = 10;
pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct InputError {
    pub field: &'static str,
    pub reason: String,
}

impl InputError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        InputError {
            field,
            reason: reason.into(),
        }
    }
}

pub fn validate_rating(rating: u8) -> Result<(), InputError> {
    if rating > MAX_RATING {
        return Err(InputError::new(
            "rating",
            format!("must be between 0 and {MAX_RATING}, got {rating}"),
        ));
    }
    Ok(())
}

/// Narrow a wire integer to a rating, rejecting anything outside `0..=MAX_RATING`.
pub fn parse_rating(raw: i64) -> Result<u8, InputError> {
    let rating = u8::try_from(raw).map_err(|_| {
        InputError::new(
            "rating",
            format!("must be between 0 and {MAX_RATING}, got {raw}"),
        )
    })?;
    validate_rating(rating)?;
    Ok(rating)
}

pub fn validate_comment(comment: &str) -> Result<(), InputError> {
    let len = comment.trim().chars().count();
    if !(MIN_COMMENT_LEN..=MAX_COMMENT_LEN).contains(&len) {
        return Err(InputError::new(
            "comment",
            format!("must be {MIN_COMMENT_LEN} to {MAX_COMMENT_LEN} characters, got {len}"),
        ));
    }
    Ok(())
}

pub fn validate_review_id(review_id: &str) -> Result<(), InputError> {
    Uuid::parse_str(review_id)
        .map(|_| ())
        .map_err(|_| InputError::new("reviewId", "must be a valid UUID"))
}
