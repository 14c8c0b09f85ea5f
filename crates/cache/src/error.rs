/// Errors raised by a [`GoodCache`](crate::traits::GoodCache).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The key is absent or its entry has expired. Expected on a cold cache.
    #[error("key not found")]
    KeyNotFound,

    #[error("cache payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cache backend error: {0}")]
    Backend(#[from] redis::RedisError),
}
