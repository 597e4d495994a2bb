//! Redis list-backed queue.
//!
//! Producers `LPUSH` onto `<name>`. A receive moves the tail of `<name>` to the
//! head of `<name>:processing` atomically (`LMOVE`/`BLMOVE`), and an ack removes it
//! from there. Anything left in the processing list after a crash can be pushed
//! back with [`RedisQueue::requeue_stale`].

use std::collections::HashMap;
use std::sync::Mutex;

use redis::{Client, Commands, Connection};

use super::{Message, PublishError, Publisher, Subscriber};

pub struct RedisQueue {
    client: Client,
    name: String,
    processing: String,
    /// Raw list entries of messages received but not yet acked, by message id.
    in_flight: Mutex<HashMap<String, String>>,
}

impl RedisQueue {
    pub fn open(url: &str, name: impl Into<String>) -> Result<Self, PublishError> {
        let client = Client::open(url).map_err(connection_failed)?;
        let name = name.into();
        Ok(Self {
            client,
            processing: format!("{}:processing", name),
            name,
            in_flight: Mutex::new(HashMap::new()),
        })
    }

    fn connection(&self) -> Result<Connection, PublishError> {
        self.client.get_connection().map_err(connection_failed)
    }

    /// Move everything in the processing list back onto the queue.
    pub fn requeue_stale(&self) -> Result<usize, PublishError> {
        let mut conn = self.connection()?;
        let mut moved = 0;
        loop {
            let entry: Option<String> = redis::cmd("LMOVE")
                .arg(&self.processing)
                .arg(&self.name)
                .arg("RIGHT")
                .arg("RIGHT")
                .query(&mut conn)
                .map_err(connection_failed)?;
            if entry.is_none() {
                return Ok(moved);
            }
            moved += 1;
        }
    }

    fn remove_in_flight(&self, message_id: &str) -> Result<Option<String>, PublishError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| PublishError::ConnectionFailed("in-flight table poisoned".into()))?;
        Ok(in_flight.remove(message_id))
    }
}

fn connection_failed(err: redis::RedisError) -> PublishError {
    PublishError::ConnectionFailed(err.to_string())
}

impl Publisher for RedisQueue {
    fn publish(&self, message: Message) -> Result<(), PublishError> {
        let raw = serde_json::to_string(&message)
            .map_err(|e| PublishError::SerializationFailed(e.to_string()))?;
        let mut conn = self.connection()?;
        conn.lpush::<_, _, ()>(&self.name, raw)
            .map_err(connection_failed)
    }
}

impl Subscriber for RedisQueue {
    fn poll(&self, timeout_ms: u64) -> Result<Option<Message>, PublishError> {
        let mut conn = self.connection()?;
        let mut cmd = if timeout_ms == 0 {
            redis::cmd("LMOVE")
        } else {
            redis::cmd("BLMOVE")
        };
        cmd.arg(&self.name)
            .arg(&self.processing)
            .arg("RIGHT")
            .arg("LEFT");
        if timeout_ms > 0 {
            cmd.arg(timeout_ms as f64 / 1000.0);
        }
        let entry: Option<String> = cmd.query(&mut conn).map_err(connection_failed)?;

        let Some(raw) = entry else {
            return Ok(None);
        };

        let message = match serde_json::from_str::<Message>(&raw) {
            Ok(message) => message,
            // Foreign producers push bare JSON bodies; wrap them.
            Err(_) => Message::new(uuid::Uuid::new_v4().to_string(), raw.clone()),
        };

        self.in_flight
            .lock()
            .map_err(|_| PublishError::ConnectionFailed("in-flight table poisoned".into()))?
            .insert(message.id.clone(), raw);
        Ok(Some(message))
    }

    fn ack(&self, message_id: &str) -> Result<(), PublishError> {
        let raw = self.remove_in_flight(message_id)?.ok_or_else(|| {
            PublishError::Rejected(format!("message {} is not in flight", message_id))
        })?;
        let mut conn = self.connection()?;
        conn.lrem::<_, _, ()>(&self.processing, 1, raw)
            .map_err(connection_failed)
    }
}
