use thiserror::Error;

/// Failure talking to one of the backing stores (review, book stats, activity log).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A versioned write lost against a concurrent writer.
    #[error("concurrent write detected for {collection}:{id} (expected version {expected}, got {actual})")]
    Conflict {
        collection: &'static str,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// A uniqueness constraint was violated.
    #[error("duplicate {collection} record for {key}")]
    Duplicate { collection: &'static str, key: String },
    #[error("store serialization error: {0}")]
    Serde(String),
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
