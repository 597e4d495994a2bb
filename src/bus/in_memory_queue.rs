//! In-memory queue for tests and single-process use.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::{Message, PublishError, Publisher, Subscriber};

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Message>,
    in_flight: HashMap<String, Message>,
    acked: Vec<String>,
}

/// Work queue: each message goes to one consumer and stays in flight until acked.
///
/// ```
/// use bookshelf::bus::{InMemoryQueue, Message, Publisher, Subscriber};
///
/// let queue = InMemoryQueue::new();
/// queue.publish(Message::new("m-1", "{}")).unwrap();
///
/// let message = queue.poll(100).unwrap().unwrap();
/// queue.ack(&message.id).unwrap();
/// assert!(queue.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryQueue {
    state: Arc<(Mutex<QueueState>, Condvar)>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, QueueState>, PublishError> {
        self.state
            .0
            .lock()
            .map_err(|_| PublishError::ConnectionFailed("queue lock poisoned".into()))
    }

    /// Messages waiting to be polled.
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.pending.len()).unwrap_or(0)
    }

    /// True when nothing is pending or in flight.
    pub fn is_empty(&self) -> bool {
        self.lock()
            .map(|s| s.pending.is_empty() && s.in_flight.is_empty())
            .unwrap_or(true)
    }

    pub fn in_flight(&self) -> usize {
        self.lock().map(|s| s.in_flight.len()).unwrap_or(0)
    }

    /// Pending message bodies, oldest first.
    pub fn bodies(&self) -> Vec<String> {
        self.lock()
            .map(|s| s.pending.iter().map(|m| m.body.clone()).collect())
            .unwrap_or_default()
    }

    pub fn acknowledged(&self) -> Vec<String> {
        self.lock().map(|s| s.acked.clone()).unwrap_or_default()
    }
}

impl Publisher for InMemoryQueue {
    fn publish(&self, message: Message) -> Result<(), PublishError> {
        self.lock()?.pending.push_back(message);
        self.state.1.notify_one();
        Ok(())
    }

    fn publish_batch(&self, messages: Vec<Message>) -> Result<(), PublishError> {
        self.lock()?.pending.extend(messages);
        self.state.1.notify_all();
        Ok(())
    }
}

impl Subscriber for InMemoryQueue {
    fn poll(&self, timeout_ms: u64) -> Result<Option<Message>, PublishError> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        let mut state = self.lock()?;

        loop {
            if let Some(message) = state.pending.pop_front() {
                state.in_flight.insert(message.id.clone(), message.clone());
                return Ok(Some(message));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            state = self
                .state
                .1
                .wait_timeout(state, deadline - now)
                .map_err(|_| PublishError::ConnectionFailed("queue lock poisoned".into()))?
                .0;
        }
    }

    fn ack(&self, message_id: &str) -> Result<(), PublishError> {
        let mut state = self.lock()?;
        if state.in_flight.remove(message_id).is_none() {
            return Err(PublishError::Rejected(format!(
                "message {} is not in flight",
                message_id
            )));
        }
        state.acked.push(message_id.to_string());
        Ok(())
    }
}
