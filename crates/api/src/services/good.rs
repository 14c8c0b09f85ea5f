//! Read-through caching and invalidate-on-write for goods.
//!
//! The store is the source of truth. The cache is best-effort: lookups that
//! fail for any reason fall back to the store, and failed writes or
//! invalidations are logged without failing the request.

use std::sync::Arc;

use goods_cache::{CacheError, GoodCache};
use goods_core::cache_key::CacheKey;
use goods_core::good::{CreateGood, Good, PatchGood};
use goods_core::pagination::{Page, PageMeta};
use goods_core::types::DbId;
use goods_db::{GoodStore, StoreError};
use serde::Serialize;

use crate::error::AppResult;

/// Confirmation body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedGood {
    pub id: DbId,
    pub project_id: DbId,
    pub removed: bool,
}

/// A page of goods with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct GoodPage {
    pub meta: PageMeta,
    pub goods: Vec<Good>,
}

/// Reachability of the service's collaborators.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub store: bool,
    pub cache: bool,
}

/// Request-scoped operations on goods.
///
/// Holds no state of its own beyond the injected store and cache handles,
/// so one instance is shared by every request.
pub struct GoodService {
    store: Arc<dyn GoodStore>,
    cache: Arc<dyn GoodCache>,
}

impl GoodService {
    pub fn new(store: Arc<dyn GoodStore>, cache: Arc<dyn GoodCache>) -> Self {
        Self { store, cache }
    }

    /// Return a good, serving it from the cache when possible.
    pub async fn read(&self, id: DbId, project_id: DbId) -> AppResult<Good> {
        let key = CacheKey::new(id, project_id);

        match self.cache.get(&key).await {
            Ok(good) => {
                tracing::debug!(%key, "Cache hit");
                return Ok(good);
            }
            Err(CacheError::KeyNotFound) => tracing::debug!(%key, "Cache miss"),
            Err(e) => tracing::warn!(%key, error = %e, "Cache lookup failed, reading from store"),
        }

        let good = self.store.get(id, project_id).await?;
        self.populate(&key, &good).await;
        Ok(good)
    }

    /// Validate and store a new good. The cache is not touched.
    pub async fn create(&self, input: CreateGood) -> AppResult<Good> {
        let new_good = input.into_new_good()?;

        let good = self.store.save(&new_good).await.inspect_err(|e| {
            if let StoreError::AlreadyExists { id } = e {
                tracing::info!(good_id = id, "Good already exists");
            }
        })?;

        tracing::info!(good_id = good.id, project_id = good.project_id, "Good created");
        Ok(good)
    }

    /// Overwrite the mutable fields of `(id, project_id)` and invalidate its
    /// cache entry.
    ///
    /// Identity comes from the arguments; ids in `input` are ignored.
    pub async fn patch(&self, id: DbId, project_id: DbId, input: PatchGood) -> AppResult<Good> {
        let patch = input.into_patch(id, project_id)?;
        let key = CacheKey::new(id, project_id);

        match self.store.patch(&patch).await {
            Ok(good) => {
                tracing::info!(good_id = id, project_id, "Good patched");
                self.invalidate(&key).await;
                Ok(good)
            }
            Err(StoreError::InsertionFailure) => {
                // The row most likely vanished under a concurrent delete.
                self.invalidate(&key).await;
                Err(StoreError::InsertionFailure.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Hard-delete `(id, project_id)` and invalidate its cache entry.
    pub async fn delete(&self, id: DbId, project_id: DbId) -> AppResult<DeletedGood> {
        self.store.delete(id, project_id).await?;
        tracing::info!(good_id = id, project_id, "Good removed");

        self.invalidate(&CacheKey::new(id, project_id)).await;

        Ok(DeletedGood {
            id,
            project_id,
            removed: true,
        })
    }

    /// List a page of goods, caching each one under its own key.
    pub async fn list(&self, offset: i64, limit: i64) -> AppResult<GoodPage> {
        let page = Page::new(offset, limit)?;
        let goods = self.store.list(page.offset, page.limit).await?;

        for good in &goods {
            self.populate(&CacheKey::from(good), good).await;
        }

        Ok(GoodPage {
            meta: PageMeta::for_page(page, &goods),
            goods,
        })
    }

    pub async fn health(&self) -> Health {
        let (store, cache) = tokio::join!(self.store.ping(), self.cache.ping());
        if let Err(e) = &store {
            tracing::warn!(error = %e, "Store health check failed");
        }
        if let Err(e) = &cache {
            tracing::warn!(error = %e, "Cache health check failed");
        }
        Health {
            store: store.is_ok(),
            cache: cache.is_ok(),
        }
    }

    async fn populate(&self, key: &CacheKey, good: &Good) {
        if let Err(e) = self.cache.set(key, good).await {
            tracing::error!(%key, error = %e, "Failed to set good in cache");
        }
    }

    async fn invalidate(&self, key: &CacheKey) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::error!(%key, error = %e, "Failed to delete good from cache");
        }
    }
}
