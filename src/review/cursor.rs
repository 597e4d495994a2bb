use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Review;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("cursor is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("cursor payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Position in a reverse-chronological scan: the last review returned.
///
/// Travels to clients as an opaque URL-safe base64 token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanCursor {
    pub created_at: DateTime<Utc>,
    pub review_id: String,
}

impl ScanCursor {
    pub fn after(review: &Review) -> Self {
        ScanCursor {
            created_at: review.created_at,
            review_id: review.review_id.clone(),
        }
    }

    pub fn encode(&self) -> String {
        // Serializing two plain fields cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD.decode(token)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// True if `review` sorts strictly after this position (newest first, id as tiebreak).
    pub fn precedes(&self, review: &Review) -> bool {
        (review.created_at, review.review_id.as_str()) < (self.created_at, self.review_id.as_str())
    }
}
