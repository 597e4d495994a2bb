use std::time::Duration;

use redis::{Client, Commands, Connection};

use super::{CacheError, CacheStore};

/// Cache backed by Redis string keys with `EX` expiry.
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    pub fn open(url: &str) -> Result<Self, CacheError> {
        Ok(Self {
            client: Client::open(url).map_err(backend)?,
        })
    }

    fn connection(&self) -> Result<Connection, CacheError> {
        self.client.get_connection().map_err(backend)
    }
}

fn backend(err: redis::RedisError) -> CacheError {
    CacheError::Backend(err.to_string())
}

impl CacheStore for RedisCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.connection()?.get(key).map_err(backend)
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.connection()?
            .set_ex(key, value, ttl.as_secs().max(1))
            .map_err(backend)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.connection()?.del(key).map_err(backend)
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut conn = self.connection()?;
        let keys: Vec<String> = conn
            .scan_match::<_, String>(format!("{}*", prefix))
            .map_err(backend)?
            .collect();
        if keys.is_empty() {
            return Ok(0);
        }
        conn.del::<_, usize>(keys).map_err(backend)
    }
}
