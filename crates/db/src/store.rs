//! The record store contract and its PostgreSQL implementation.

use async_trait::async_trait;
use goods_core::good::{Good, GoodPatch, NewGood};
use goods_core::types::DbId;

use crate::error::{is_unique_violation, StoreError};
use crate::repositories::GoodRepo;
use crate::DbPool;

/// Durable storage for goods.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait GoodStore: Send + Sync {
    /// Fetch the good matching both `id` and `project_id`.
    async fn get(&self, id: DbId, project_id: DbId) -> Result<Good, StoreError>;

    /// Insert a good and return it with its assigned `id` and `created_at`.
    ///
    /// Fails with [`StoreError::AlreadyExists`] when an explicitly requested
    /// id is already taken.
    async fn save(&self, input: &NewGood) -> Result<Good, StoreError>;

    /// Overwrite `name`, `description`, `priority` and `removed` of an
    /// existing good, atomically with its existence check.
    async fn patch(&self, patch: &GoodPatch) -> Result<Good, StoreError>;

    /// Hard-delete a good.
    async fn delete(&self, id: DbId, project_id: DbId) -> Result<(), StoreError>;

    /// A page of goods ordered by ascending id. An empty page is not an error.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Good>, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`GoodStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgGoodStore {
    pool: DbPool,
}

impl PgGoodStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl GoodStore for PgGoodStore {
    async fn get(&self, id: DbId, project_id: DbId) -> Result<Good, StoreError> {
        GoodRepo::find(&self.pool, id, project_id)
            .await?
            .ok_or(StoreError::NotFound { id, project_id })
    }

    async fn save(&self, input: &NewGood) -> Result<Good, StoreError> {
        // Dropping `tx` on any early return rolls it back.
        let mut tx = self.pool.begin().await?;

        if let Some(id) = input.id {
            if GoodRepo::lock_by_id(&mut *tx, id).await? {
                return Err(StoreError::AlreadyExists { id });
            }
        }

        let good = match GoodRepo::insert(&mut *tx, input).await {
            Ok(Some(good)) => good,
            Ok(None) => return Err(StoreError::InsertionFailure),
            // A concurrent insert of the same id won the race past the lock.
            Err(e) => {
                return Err(match input.id {
                    Some(id) if is_unique_violation(&e) => StoreError::AlreadyExists { id },
                    _ => e.into(),
                });
            }
        };

        if input.id.is_some() {
            GoodRepo::advance_id_sequence(&mut *tx, good.id).await?;
        }

        tx.commit().await?;
        tracing::debug!(good_id = good.id, project_id = good.project_id, "Good inserted");
        Ok(good)
    }

    async fn patch(&self, patch: &GoodPatch) -> Result<Good, StoreError> {
        let mut tx = self.pool.begin().await?;

        if !GoodRepo::lock_by_key(&mut *tx, patch.id, patch.project_id).await? {
            return Err(StoreError::NotFound {
                id: patch.id,
                project_id: patch.project_id,
            });
        }

        let good = GoodRepo::update(&mut *tx, patch)
            .await?
            .ok_or(StoreError::InsertionFailure)?;

        tx.commit().await?;
        Ok(good)
    }

    async fn delete(&self, id: DbId, project_id: DbId) -> Result<(), StoreError> {
        if GoodRepo::hard_delete(&self.pool, id, project_id).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound { id, project_id })
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Good>, StoreError> {
        Ok(GoodRepo::list(&self.pool, offset, limit).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
