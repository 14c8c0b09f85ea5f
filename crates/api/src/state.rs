use std::sync::Arc;

use crate::services::GoodService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Good operations over the injected store and cache.
    pub goods: Arc<GoodService>,
}
