//! Row mapping for the `goods` table.

use goods_core::good::Good;
use goods_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `goods` table.
#[derive(Debug, Clone, FromRow)]
pub struct GoodRow {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub priority: Option<i32>,
    pub removed: bool,
    pub created_at: Timestamp,
}

impl From<GoodRow> for Good {
    fn from(row: GoodRow) -> Self {
        Good {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            description: row.description,
            priority: row.priority,
            removed: row.removed,
            created_at: row.created_at,
        }
    }
}
