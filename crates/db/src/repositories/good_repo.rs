//! Repository for the `goods` table.
//!
//! Statements that take part in a check-then-act sequence accept a
//! `&mut PgConnection` so they can run on an open transaction; standalone
//! reads and the hard delete run on the pool.

use goods_core::good::{Good, GoodPatch, NewGood};
use goods_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::good::GoodRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, priority, removed, created_at";

/// Provides the SQL statements behind [`PgGoodStore`](crate::store::PgGoodStore).
pub struct GoodRepo;

impl GoodRepo {
    /// Find a good by its compound identity.
    pub async fn find(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Good>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goods WHERE id = $1 AND project_id = $2");
        let row = sqlx::query_as::<_, GoodRow>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Good::from))
    }

    /// Take a share lock on the row with `id`, whatever its project.
    ///
    /// Returns `false` when no such row exists.
    pub async fn lock_by_id(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM goods WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(found.is_some())
    }

    /// Take a share lock on the row addressed by `(id, project_id)`.
    ///
    /// Returns `false` when no such row exists.
    pub async fn lock_by_key(
        conn: &mut PgConnection,
        id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM goods WHERE id = $1 AND project_id = $2 FOR SHARE",
        )
        .bind(id)
        .bind(project_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(found.is_some())
    }

    /// Insert a new good, returning the stored row.
    ///
    /// Uses the requested id when one is given, the table sequence otherwise.
    /// `created_at` always comes from the database clock.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewGood,
    ) -> Result<Option<Good>, sqlx::Error> {
        let query = format!(
            "INSERT INTO goods (id, project_id, name, description, priority, removed)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('goods', 'id'))), $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GoodRow>(&query)
            .bind(input.id)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.removed)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(Good::from))
    }

    /// Move the id sequence past `id` so later sequence-assigned ids skip it.
    ///
    /// Never moves the sequence backwards.
    pub async fn advance_id_sequence(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "SELECT setval(seq, $1)
             FROM (SELECT pg_get_serial_sequence('goods', 'id')::regclass AS seq) s
             WHERE $1 > COALESCE(pg_sequence_last_value(seq), 0)",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Overwrite the mutable fields of a good.
    ///
    /// Returns `None` if the row vanished since it was locked.
    pub async fn update(
        conn: &mut PgConnection,
        patch: &GoodPatch,
    ) -> Result<Option<Good>, sqlx::Error> {
        let query = format!(
            "UPDATE goods SET
                name = $3,
                description = $4,
                priority = $5,
                removed = $6
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GoodRow>(&query)
            .bind(patch.id)
            .bind(patch.project_id)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(patch.priority)
            .bind(patch.removed)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(Good::from))
    }

    /// Permanently delete a good. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goods WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List goods ordered by ascending id.
    pub async fn list(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<Good>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goods ORDER BY id ASC LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, GoodRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Good::from).collect())
    }
}
