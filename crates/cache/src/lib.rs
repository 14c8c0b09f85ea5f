//! Key-value cache of fully materialized goods.
//!
//! The cache only ever holds complete snapshots: a good is written whole
//! under its composite key with a fixed time-to-live, and writes to the
//! store invalidate the key rather than updating fields in place.

use std::time::Duration;

pub mod error;
pub mod memory;
pub mod redis_cache;
pub mod traits;

pub use error::CacheError;
pub use memory::{MemoryCache, DEFAULT_CAPACITY};
pub use redis_cache::RedisCache;
pub use traits::GoodCache;

/// Lifetime of a cached good when none is configured (20 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(20 * 60);
