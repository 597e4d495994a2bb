use tracing::{debug, info, warn};

use super::{ActivityEnvelope, ActivityLog, ActivityLogStore, ConsumerError, USER_ACTIVITY};
use crate::bus::{Message, Subscriber};

/// Messages taken from the queue per run.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Outcome of one [`ActivityConsumer::run_once`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainResult {
    pub received: usize,
    pub logged: usize,
    pub skipped: usize,
}

/// Drains activity messages from a queue into an [`ActivityLogStore`].
pub struct ActivityConsumer<Q, S> {
    queue: Q,
    store: S,
    batch_size: usize,
    wait_ms: u64,
}

impl<Q: Subscriber, S: ActivityLogStore> ActivityConsumer<Q, S> {
    pub fn new(queue: Q, store: S) -> Self {
        Self {
            queue,
            store,
            batch_size: DEFAULT_BATCH_SIZE,
            wait_ms: 0,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// How long a run waits for the first message.
    pub fn with_wait_ms(mut self, wait_ms: u64) -> Self {
        self.wait_ms = wait_ms;
        self
    }

    /// Take up to one batch off the queue and write the activity payloads in a
    /// single `put_batch`. Each message is deleted as soon as it is received; a
    /// failed delete is logged and the message is still written.
    /// An empty queue performs no write.
    pub fn run_once(&self) -> Result<DrainResult, ConsumerError> {
        let messages = self.queue.receive_batch(self.batch_size, self.wait_ms)?;
        let mut result = DrainResult {
            received: messages.len(),
            ..DrainResult::default()
        };
        if messages.is_empty() {
            debug!("activity queue empty");
            return Ok(result);
        }

        let mut logs = Vec::with_capacity(messages.len());
        for message in &messages {
            // The payload is still written; the queue may deliver it again.
            if let Err(err) = self.queue.ack(&message.id) {
                warn!(message_id = %message.id, error = %err, "failed to delete message");
            }
            match parse(message) {
                Some(log) => logs.push(log),
                None => result.skipped += 1,
            }
        }

        if !logs.is_empty() {
            self.store.put_batch(&logs)?;
        }
        result.logged = logs.len();
        info!(
            received = result.received,
            logged = result.logged,
            skipped = result.skipped,
            "activity batch written"
        );
        Ok(result)
    }
}

fn parse(message: &Message) -> Option<ActivityLog> {
    let envelope: ActivityEnvelope = match serde_json::from_str(&message.body) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(message_id = %message.id, error = %err, "dropping unparseable message");
            return None;
        }
    };
    if envelope.kind != USER_ACTIVITY {
        warn!(message_id = %message.id, kind = %envelope.kind, "dropping message of unknown type");
        return None;
    }
    Some(ActivityLog::from(envelope.payload))
}
