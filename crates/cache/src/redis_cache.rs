//! Redis-backed [`GoodCache`].

use std::time::Duration;

use async_trait::async_trait;
use goods_core::cache_key::CacheKey;
use goods_core::good::Good;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};

use crate::error::CacheError;
use crate::traits::GoodCache;

/// Goods cached as JSON strings with `SET ... EX`.
///
/// The [`ConnectionManager`] multiplexes one connection and reconnects on
/// failure; cloning it is cheap, so every call works on its own handle.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    ttl: Duration,
}

impl RedisCache {
    /// Connect to `url` (e.g. `redis://localhost:6379`) and verify the
    /// server answers `PING`.
    ///
    /// A `password` given here overrides any password embedded in the URL.
    pub async fn connect(
        url: &str,
        password: Option<&str>,
        ttl: Duration,
    ) -> Result<Self, CacheError> {
        let mut info = url.into_connection_info()?;
        if let Some(password) = password {
            info.redis.password = Some(password.to_string());
        }

        let client = redis::Client::open(info)?;
        let conn = ConnectionManager::new(client).await?;

        let cache = Self { conn, ttl };
        cache.ping().await?;
        tracing::debug!(ttl_secs = cache.ttl_secs(), "Redis cache ready");
        Ok(cache)
    }

    /// Redis rejects `EX 0`, so sub-second TTLs round up to one second.
    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }
}

#[async_trait]
impl GoodCache for RedisCache {
    async fn get(&self, key: &CacheKey) -> Result<Good, CacheError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(key.as_str()).await?;
        match payload {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Err(CacheError::KeyNotFound),
        }
    }

    async fn set(&self, key: &CacheKey, good: &Good) -> Result<(), CacheError> {
        let payload = serde_json::to_string(good)?;
        let mut conn = self.conn.clone();
        let () = conn.set_ex(key.as_str(), payload, self.ttl_secs()).await?;
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let () = conn.del(key.as_str()).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
