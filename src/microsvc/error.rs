//! Error type for command handlers.

use thiserror::Error;
use tracing::error;

use crate::review::InputError;
use crate::vote::VoteError;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("bad input: {0}")]
    BadInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// The detail is for logs only; clients see a generic message.
    #[error("internal server error")]
    Internal(String),
}

impl HandlerError {
    /// HTTP-style status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::BadInput(_) => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Forbidden(_) => 403,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Internal(_) => 500,
        }
    }
}

impl From<InputError> for HandlerError {
    fn from(err: InputError) -> Self {
        HandlerError::BadInput(err.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Internal(format!("response encoding: {}", err))
    }
}

impl From<VoteError> for HandlerError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::BadInput(msg) => HandlerError::BadInput(msg),
            VoteError::NotFound { review_id } => {
                HandlerError::NotFound(format!("review {}", review_id))
            }
            err @ VoteError::Forbidden { .. } => HandlerError::Forbidden(err.to_string()),
            err => {
                error!(error = %err, "vote engine failure");
                HandlerError::Internal(err.to_string())
            }
        }
    }
}
