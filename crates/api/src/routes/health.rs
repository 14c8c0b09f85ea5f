use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct PingResponse {
    pub pong: bool,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether the cache is reachable.
    pub cache_healthy: bool,
}

/// GET /ping -- process liveness, touches no collaborator.
async fn ping() -> Json<PingResponse> {
    Json(PingResponse { pong: true })
}

/// GET /health -- returns service, database and cache health.
///
/// A dead cache only degrades the service; reads still go to the store.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let health = state.goods.health().await;

    let status = match (health.store, health.cache) {
        (true, true) => "ok",
        (true, false) => "degraded",
        (false, _) => "unavailable",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy: health.store,
        cache_healthy: health.cache,
    })
}

/// Mount liveness and health routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
}
