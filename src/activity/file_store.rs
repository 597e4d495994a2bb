//! Activity log as a JSON-lines file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::store::newest;
use super::{ActivityLog, ActivityLogStore, ActivityType, TYPE_QUERY_LIMIT, USER_QUERY_LIMIT};
use crate::error::StoreError;
use crate::review::UserId;

/// One record per line. A batch is appended with a single write.
pub struct FileActivityLogStore {
    path: PathBuf,
    // Serializes writers within this process.
    write_lock: Mutex<()>,
}

impl FileActivityLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ActivityLog>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut logs = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(log) => logs.push(log),
                Err(err) => warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    error = %err,
                    "skipping unreadable activity record"
                ),
            }
        }
        Ok(logs)
    }
}

impl ActivityLogStore for FileActivityLogStore {
    fn put_batch(&self, logs: &[ActivityLog]) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        for log in logs {
            serde_json::to_writer(&mut buf, log)?;
            buf.push(b'\n');
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("append"))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&buf)?;
        file.flush()?;
        Ok(())
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<ActivityLog>, StoreError> {
        let logs = self.read_all()?;
        Ok(newest(logs.iter(), |l| l.user_id == user_id, USER_QUERY_LIMIT))
    }

    fn list_by_type_since(
        &self,
        activity_type: &ActivityType,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityLog>, StoreError> {
        let logs = self.read_all()?;
        Ok(newest(
            logs.iter(),
            |l| &l.activity_type == activity_type && l.timestamp > since,
            TYPE_QUERY_LIMIT,
        ))
    }

    fn remove_by_type_before(
        &self,
        activity_type: &ActivityType,
        before: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("rewrite"))?;

        let logs = self.read_all()?;
        let total = logs.len();
        let mut buf = Vec::new();
        for log in logs
            .iter()
            .filter(|l| !(&l.activity_type == activity_type && l.timestamp < before))
        {
            serde_json::to_writer(&mut buf, log)?;
            buf.push(b'\n');
        }
        let kept = buf.iter().filter(|b| **b == b'\n').count();
        if kept == total {
            return Ok(0);
        }

        let tmp = self.path.with_extension("jsonl.tmp");
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;
        Ok(total - kept)
    }
}
