use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::review::UserId;

/// Queue message type tag for activity events.
pub const USER_ACTIVITY: &str = "useractivity";

/// What a user did. Unknown strings from newer producers are carried through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityType {
    UserSignup,
    UserSignin,
    UserUpdated,
    UserDeleted,
    BookCreated,
    BookUpdatedWithStatusPublished,
    /// Wire name is `BOOK_STATUS_CHANGED_TO_ARCHIVED`.
    BookDeleted,
    ReviewVoted,
    ReviewUpdated,
    ReviewRemoved,
    Other(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::UserSignup => "USER_SIGNUP",
            ActivityType::UserSignin => "USER_SIGNIN",
            ActivityType::UserUpdated => "USER_UPDATED",
            ActivityType::UserDeleted => "USER_DELETED",
            ActivityType::BookCreated => "BOOK_CREATED",
            ActivityType::BookUpdatedWithStatusPublished => "BOOK_UPDATED_WITH_STATUS_PUBLISHED",
            ActivityType::BookDeleted => "BOOK_STATUS_CHANGED_TO_ARCHIVED",
            ActivityType::ReviewVoted => "REVIEW_VOTED",
            ActivityType::ReviewUpdated => "REVIEW_UPDATED",
            ActivityType::ReviewRemoved => "REVIEW_REMOVED",
            ActivityType::Other(other) => other,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "USER_SIGNUP" => ActivityType::UserSignup,
            "USER_SIGNIN" => ActivityType::UserSignin,
            "USER_UPDATED" => ActivityType::UserUpdated,
            "USER_DELETED" => ActivityType::UserDeleted,
            "BOOK_CREATED" => ActivityType::BookCreated,
            "BOOK_UPDATED_WITH_STATUS_PUBLISHED" => ActivityType::BookUpdatedWithStatusPublished,
            "BOOK_STATUS_CHANGED_TO_ARCHIVED" => ActivityType::BookDeleted,
            "REVIEW_VOTED" => ActivityType::ReviewVoted,
            "REVIEW_UPDATED" => ActivityType::ReviewUpdated,
            "REVIEW_REMOVED" => ActivityType::ReviewRemoved,
            other => ActivityType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActivityType::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPayload {
    pub user_id: UserId,
    pub activity_type: ActivityType,
    pub timestamp: DateTime<Utc>,
}

/// The queue message body: `{"type": "useractivity", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: ActivityPayload,
}

impl ActivityEnvelope {
    pub fn user_activity(payload: ActivityPayload) -> Self {
        ActivityEnvelope {
            kind: USER_ACTIVITY.to_string(),
            payload,
        }
    }
}

/// A persisted activity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub activity_id: String,
    pub user_id: UserId,
    pub activity_type: ActivityType,
    pub timestamp: DateTime<Utc>,
}

impl From<ActivityPayload> for ActivityLog {
    fn from(payload: ActivityPayload) -> Self {
        ActivityLog {
            activity_id: Uuid::new_v4().to_string(),
            user_id: payload.user_id,
            activity_type: payload.activity_type,
            timestamp: payload.timestamp,
        }
    }
}
