use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{ActivityLog, ActivityType};
use crate::error::StoreError;
use crate::review::UserId;

/// Results returned by [`ActivityLogStore::list_by_user`].
pub const USER_QUERY_LIMIT: usize = 10;
/// Results returned by [`ActivityLogStore::list_by_type_since`].
pub const TYPE_QUERY_LIMIT: usize = 20;

/// Persistent activity log.
pub trait ActivityLogStore: Send + Sync {
    /// Write a whole batch in one call.
    fn put_batch(&self, logs: &[ActivityLog]) -> Result<(), StoreError>;

    /// A user's newest activities.
    fn list_by_user(&self, user_id: UserId) -> Result<Vec<ActivityLog>, StoreError>;

    /// Newest activities of one type strictly after `since`.
    fn list_by_type_since(
        &self,
        activity_type: &ActivityType,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityLog>, StoreError>;

    /// Delete every activity of one type strictly before `before`; returns how many.
    fn remove_by_type_before(
        &self,
        activity_type: &ActivityType,
        before: DateTime<Utc>,
    ) -> Result<usize, StoreError>;
}

impl<T: ActivityLogStore + ?Sized> ActivityLogStore for Arc<T> {
    fn put_batch(&self, logs: &[ActivityLog]) -> Result<(), StoreError> {
        (**self).put_batch(logs)
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<ActivityLog>, StoreError> {
        (**self).list_by_user(user_id)
    }

    fn list_by_type_since(
        &self,
        activity_type: &ActivityType,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityLog>, StoreError> {
        (**self).list_by_type_since(activity_type, since)
    }

    fn remove_by_type_before(
        &self,
        activity_type: &ActivityType,
        before: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        (**self).remove_by_type_before(activity_type, before)
    }
}

/// Shared query logic for stores that hold every record in a `Vec`.
pub(crate) fn newest<'a>(
    logs: impl Iterator<Item = &'a ActivityLog>,
    keep: impl Fn(&ActivityLog) -> bool,
    limit: usize,
) -> Vec<ActivityLog> {
    let mut matching: Vec<ActivityLog> = logs.filter(|l| keep(l)).cloned().collect();
    matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    matching.truncate(limit);
    matching
}
