//! Route definitions for the `/good` resource.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::good;
use crate::state::AppState;

/// Routes for goods.
///
/// ```text
/// GET    /good/{id}?projectId=          -> get_by_id
/// POST   /good/create                   -> create
/// PATCH  /good/update?id=&projectId=    -> update
/// DELETE /good?id=&projectId=           -> delete
/// GET    /good/list?limit=&offset=      -> list
/// ```
///
/// `/good/list` is a static segment and takes precedence over `/good/{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/good", delete(good::delete))
        .route("/good/create", post(good::create))
        .route("/good/update", patch(good::update))
        .route("/good/list", get(good::list))
        .route("/good/{id}", get(good::get_by_id))
}
