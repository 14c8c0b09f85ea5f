use async_trait::async_trait;
use goods_core::cache_key::CacheKey;
use goods_core::good::Good;

use crate::error::CacheError;

/// Cache backend for goods.
///
/// Callers treat every error as non-fatal: a failed lookup falls back to the
/// store and a failed write or invalidation is only logged.
#[async_trait]
pub trait GoodCache: Send + Sync {
    /// Fetch a cached good. Returns [`CacheError::KeyNotFound`] if the key is
    /// absent or expired.
    async fn get(&self, key: &CacheKey) -> Result<Good, CacheError>;

    /// Store a complete snapshot of `good` under `key`, replacing any
    /// previous value and resetting its time-to-live.
    async fn set(&self, key: &CacheKey, good: &Good) -> Result<(), CacheError>;

    /// Invalidate `key`. Deleting an absent key succeeds.
    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), CacheError>;
}
