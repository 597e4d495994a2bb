//! Publisher and subscriber traits for the activity queue.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A message on the queue. The body is the JSON text the producer sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub body: String,
}

impl Message {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    /// Serialize `payload` as JSON under a fresh id.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, PublishError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| PublishError::SerializationFailed(e.to_string()))?;
        Ok(Self::new(Uuid::new_v4().to_string(), body))
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
    #[error("message rejected: {0}")]
    Rejected(String),
    #[error("publish timeout")]
    Timeout,
}

/// Sends messages to a queue.
pub trait Publisher: Send + Sync {
    /// Returns once the transport has accepted the message.
    fn publish(&self, message: Message) -> Result<(), PublishError>;

    fn publish_batch(&self, messages: Vec<Message>) -> Result<(), PublishError> {
        for message in messages {
            self.publish(message)?;
        }
        Ok(())
    }
}

/// Pull-based consumer side of a queue.
pub trait Subscriber: Send + Sync {
    /// Wait up to `timeout_ms` for the next message.
    fn poll(&self, timeout_ms: u64) -> Result<Option<Message>, PublishError>;

    /// Mark a polled message as done; it will not be delivered again.
    fn ack(&self, message_id: &str) -> Result<(), PublishError>;

    /// Receive up to `max` messages, waiting `timeout_ms` only for the first.
    fn receive_batch(&self, max: usize, timeout_ms: u64) -> Result<Vec<Message>, PublishError> {
        let mut batch = Vec::new();
        while batch.len() < max {
            let wait = if batch.is_empty() { timeout_ms } else { 0 };
            match self.poll(wait)? {
                Some(message) => batch.push(message),
                None => break,
            }
        }
        Ok(batch)
    }
}

impl<T: Publisher + ?Sized> Publisher for Arc<T> {
    fn publish(&self, message: Message) -> Result<(), PublishError> {
        (**self).publish(message)
    }

    fn publish_batch(&self, messages: Vec<Message>) -> Result<(), PublishError> {
        (**self).publish_batch(messages)
    }
}

impl<T: Subscriber + ?Sized> Subscriber for Arc<T> {
    fn poll(&self, timeout_ms: u64) -> Result<Option<Message>, PublishError> {
        (**self).poll(timeout_ms)
    }

    fn ack(&self, message_id: &str) -> Result<(), PublishError> {
        (**self).ack(message_id)
    }

    fn receive_batch(&self, max: usize, timeout_ms: u64) -> Result<Vec<Message>, PublishError> {
        (**self).receive_batch(max, timeout_ms)
    }
}
