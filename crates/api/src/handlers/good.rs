//! Handlers for the `/good` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use goods_core::good::{CreateGood, Good, PatchGood};

use crate::envelope::Payload;
use crate::error::AppResult;
use crate::query::{parse_int_param, GoodKeyParams, PaginationParams, ProjectParams};
use crate::services::good::{DeletedGood, GoodPage};
use crate::state::AppState;

/// GET /good/{id}?projectId=
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<ProjectParams>, QueryRejection>,
) -> AppResult<Json<Good>> {
    let Query(params) = params?;
    let id = parse_int_param("id", Some(&id))?;
    let project_id = parse_int_param("projectId", params.project_id.as_deref())?;

    let good = state.goods.read(id, project_id).await?;
    Ok(Json(good))
}

/// POST /good/create
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Payload<CreateGood>>, JsonRejection>,
) -> AppResult<Json<Good>> {
    let Json(Payload { payload }) = body?;
    let good = state.goods.create(payload).await?;
    Ok(Json(good))
}

/// PATCH /good/update?id=&projectId=
pub async fn update(
    State(state): State<AppState>,
    params: Result<Query<GoodKeyParams>, QueryRejection>,
    body: Result<Json<Payload<PatchGood>>, JsonRejection>,
) -> AppResult<Json<Good>> {
    let Query(params) = params?;
    let (id, project_id) = params.parse()?;
    let Json(Payload { payload }) = body?;

    let good = state.goods.patch(id, project_id, payload).await?;
    Ok(Json(good))
}

/// DELETE /good?id=&projectId=
pub async fn delete(
    State(state): State<AppState>,
    params: Result<Query<GoodKeyParams>, QueryRejection>,
) -> AppResult<Json<DeletedGood>> {
    let Query(params) = params?;
    let (id, project_id) = params.parse()?;

    let deleted = state.goods.delete(id, project_id).await?;
    Ok(Json(deleted))
}

/// GET /good/list?limit=&offset=
///
/// At most 1000 goods are returned; `meta.limit` echoes the requested limit.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Json<GoodPage>> {
    let Query(params) = params?;
    let (offset, limit) = params.parse()?;

    let page = state.goods.list(offset, limit).await?;
    Ok(Json(page))
}
