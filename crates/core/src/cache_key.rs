//! Composite cache key for a good.
//!
//! Every cached good lives under `"<id>$<project_id>"`. Reads, list
//! population and write invalidation must all derive the key through
//! [`CacheKey::new`] so they agree on the format.

use std::fmt;

use crate::good::Good;
use crate::types::DbId;

/// Separator between the id and project id halves of the key.
pub const KEY_SEPARATOR: char = '$';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(id: DbId, project_id: DbId) -> Self {
        Self(format!("{id}{KEY_SEPARATOR}{project_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Good> for CacheKey {
    fn from(good: &Good) -> Self {
        Self::new(good.id, good.project_id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
