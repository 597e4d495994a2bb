use thiserror::Error;

use crate::error::StoreError;
use crate::lock::LockError;
use crate::review::UserId;

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("bad input: {0}")]
    BadInput(String),
    #[error("review {review_id} not found")]
    NotFound { review_id: String },
    #[error("user {user_id} may not modify review {review_id}")]
    Forbidden { review_id: String, user_id: UserId },
    /// A store call failed. Carries the operation and the record it was acting on.
    #[error("{operation} failed for {id}: {source}")]
    Internal {
        operation: &'static str,
        id: String,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
}

impl VoteError {
    pub(crate) fn internal(operation: &'static str, id: impl ToString) -> impl FnOnce(StoreError) -> Self {
        let id = id.to_string();
        move |source| VoteError::Internal {
            operation,
            id,
            source,
        }
    }

    pub(crate) fn not_found(review_id: &str) -> Self {
        VoteError::NotFound {
            review_id: review_id.to_string(),
        }
    }

    /// Errors caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            VoteError::BadInput(_) | VoteError::NotFound { .. } | VoteError::Forbidden { .. }
        )
    }
}
