//! Query parameter types for the goods endpoints.
//!
//! Identifiers arrive as raw strings and are parsed with [`parse_int_param`]
//! so malformed values produce the standard JSON error body instead of the
//! extractor's plain-text rejection.

use goods_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?projectId=` on `GET /good/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProjectParams {
    #[serde(rename = "projectId", alias = "project_id")]
    pub project_id: Option<String>,
}

/// `?id=&projectId=` on the update and delete endpoints.
#[derive(Debug, Deserialize)]
pub struct GoodKeyParams {
    pub id: Option<String>,
    #[serde(rename = "projectId", alias = "project_id")]
    pub project_id: Option<String>,
}

/// `?limit=&offset=` on the list endpoint. Both are required.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Parse a required integer parameter.
pub fn parse_int_param(name: &str, raw: Option<&str>) -> AppResult<i64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        tracing::info!(param = name, "Missing query parameter");
        AppError::BadRequest(format!("{name} is required"))
    })?;
    raw.parse::<DbId>().map_err(|_| {
        tracing::info!(param = name, value = raw, "Malformed integer parameter");
        AppError::BadRequest(format!("{name} must be an integer, got '{raw}'"))
    })
}

impl GoodKeyParams {
    /// Parse `(id, projectId)`.
    pub fn parse(&self) -> AppResult<(DbId, DbId)> {
        let id = parse_int_param("id", self.id.as_deref())?;
        let project_id = parse_int_param("projectId", self.project_id.as_deref())?;
        Ok((id, project_id))
    }
}

impl PaginationParams {
    /// Parse `(offset, limit)`.
    pub fn parse(&self) -> AppResult<(i64, i64)> {
        let limit = parse_int_param("limit", self.limit.as_deref())?;
        let offset = parse_int_param("offset", self.offset.as_deref())?;
        Ok((offset, limit))
    }
}
