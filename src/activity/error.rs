use thiserror::Error;

use crate::bus::PublishError;
use crate::error::StoreError;

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("queue error: {0}")]
    Queue(#[from] PublishError),
    #[error("activity log write failed: {0}")]
    Store(#[from] StoreError),
}
