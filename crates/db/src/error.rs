use goods_core::types::DbId;

/// Errors raised by a [`GoodStore`](crate::store::GoodStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matches `(id, project_id)`.
    #[error("good {id} in project {project_id} does not exist")]
    NotFound { id: DbId, project_id: DbId },

    /// A good with this id is already stored.
    #[error("good {id} already exists")]
    AlreadyExists { id: DbId },

    /// A write passed its existence check but returned no row.
    #[error("failed getting the written row back")]
    InsertionFailure,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// PostgreSQL unique constraint violation: SQLSTATE 23505.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
