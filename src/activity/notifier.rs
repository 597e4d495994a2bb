use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{ActivityEnvelope, ActivityPayload, ActivityType};
use crate::bus::{Message, PublishError, Publisher};
use crate::review::UserId;

/// Puts activity events on the queue.
pub struct ActivityNotifier<P> {
    publisher: P,
}

impl<P: Publisher> ActivityNotifier<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Enqueue one event. Returns when the transport has accepted it.
    pub fn emit(
        &self,
        activity_type: ActivityType,
        user_id: UserId,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PublishError> {
        let envelope = ActivityEnvelope::user_activity(ActivityPayload {
            user_id,
            activity_type,
            timestamp,
        });
        let message = Message::json(&envelope)?;
        debug!(message_id = %message.id, user_id, activity = %envelope.payload.activity_type, "enqueue activity");
        self.publisher.publish(message)
    }

    /// Best-effort [`emit`](Self::emit) stamped now; failures are logged and dropped.
    pub fn notify(&self, activity_type: ActivityType, user_id: UserId) {
        let activity = activity_type.to_string();
        if let Err(err) = self.emit(activity_type, user_id, Utc::now()) {
            warn!(user_id, %activity, error = %err, "activity event dropped");
        }
    }
}
