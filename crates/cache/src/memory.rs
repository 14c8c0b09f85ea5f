//! In-process [`GoodCache`] used when no Redis server is configured.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use goods_core::cache_key::CacheKey;
use goods_core::good::Good;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::CacheError;
use crate::traits::GoodCache;
use crate::DEFAULT_TTL;

/// Entry limit of a [`MemoryCache`] when none is configured.
pub const DEFAULT_CAPACITY: usize = 10_000;

struct Entry {
    /// Serialized snapshot, so reads behave like the Redis backend.
    payload: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Map of serialized goods with per-entry expiry and a fixed entry limit.
///
/// Expired entries are dropped on the next read of their key, and all of
/// them are swept when a write finds the map full. If the map is still full
/// after the sweep, the entry closest to expiry is evicted.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
    capacity: usize,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CAPACITY)
    }

    /// A cache holding at most `capacity` entries (at least one).
    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of unexpired entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[async_trait]
impl GoodCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Good, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key.as_str()) {
                Some(entry) if entry.is_live(now) => {
                    return Ok(serde_json::from_str(&entry.payload)?);
                }
                Some(_) => {}
                None => return Err(CacheError::KeyNotFound),
            }
        }

        // Expired: drop it unless a writer refreshed it in the meantime.
        let mut entries = self.entries.write().await;
        if entries
            .get(key.as_str())
            .is_some_and(|entry| !entry.is_live(Instant::now()))
        {
            entries.remove(key.as_str());
            tracing::debug!(%key, "Evicted expired cache entry");
        }
        Err(CacheError::KeyNotFound)
    }

    async fn set(&self, key: &CacheKey, good: &Good) -> Result<(), CacheError> {
        let payload = serde_json::to_string(good)?;
        let now = Instant::now();
        let entry = Entry {
            payload,
            expires_at: now + self.ttl,
        };

        let mut entries = self.entries.write().await;
        if !entries.contains_key(key.as_str()) && entries.len() >= self.capacity {
            let before = entries.len();
            entries.retain(|_, e| e.is_live(now));

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.expires_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
            tracing::debug!(
                evicted = before - entries.len(),
                capacity = self.capacity,
                "Memory cache full, evicted entries"
            );
        }
        entries.insert(key.as_str().to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.entries.write().await.remove(key.as_str());
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
