use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::store::newest;
use super::{ActivityLog, ActivityLogStore, ActivityType, TYPE_QUERY_LIMIT, USER_QUERY_LIMIT};
use crate::error::StoreError;
use crate::review::UserId;

#[derive(Default)]
struct Logs {
    records: Vec<ActivityLog>,
    batches: usize,
}

/// Activity log held in memory. Counts `put_batch` calls so callers can check batching.
#[derive(Clone, Default)]
pub struct InMemoryActivityLogStore {
    logs: Arc<RwLock<Logs>>,
}

impl InMemoryActivityLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.logs.read().map(|l| l.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn batches_written(&self) -> usize {
        self.logs.read().map(|l| l.batches).unwrap_or(0)
    }

    pub fn records(&self) -> Vec<ActivityLog> {
        self.logs
            .read()
            .map(|l| l.records.clone())
            .unwrap_or_default()
    }
}

impl ActivityLogStore for InMemoryActivityLogStore {
    fn put_batch(&self, logs: &[ActivityLog]) -> Result<(), StoreError> {
        let mut store = self
            .logs
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        store.records.extend_from_slice(logs);
        store.batches += 1;
        Ok(())
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<ActivityLog>, StoreError> {
        let store = self
            .logs
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(newest(
            store.records.iter(),
            |l| l.user_id == user_id,
            USER_QUERY_LIMIT,
        ))
    }

    fn list_by_type_since(
        &self,
        activity_type: &ActivityType,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityLog>, StoreError> {
        let store = self
            .logs
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(newest(
            store.records.iter(),
            |l| &l.activity_type == activity_type && l.timestamp > since,
            TYPE_QUERY_LIMIT,
        ))
    }

    fn remove_by_type_before(
        &self,
        activity_type: &ActivityType,
        before: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut store = self
            .logs
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        let before_len = store.records.len();
        store
            .records
            .retain(|l| !(&l.activity_type == activity_type && l.timestamp < before));
        Ok(before_len - store.records.len())
    }
}
