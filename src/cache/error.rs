use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache encode failed: {0}")]
    Encode(String),
    #[error("cache decode failed: {0}")]
    Decode(String),
}
