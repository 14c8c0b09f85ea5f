#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use goods_api::config::ServerConfig;
use goods_api::router::build_app_router;
use goods_api::services::GoodService;
use goods_api::state::AppState;
use goods_cache::{CacheError, GoodCache, MemoryCache};
use goods_core::cache_key::CacheKey;
use goods_core::good::{Good, GoodPatch, NewGood};
use goods_core::types::DbId;
use goods_db::{GoodStore, PgGoodStore, StoreError};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        app_env: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        redis_url: None,
        redis_password: None,
        cache_ttl_secs: 1200,
        cache_capacity: 10_000,
    }
}

/// Build the full application router over the given store and cache.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app(store: Arc<dyn GoodStore>, cache: Arc<dyn GoodCache>) -> Router {
    let config = test_config();
    let state = AppState {
        goods: Arc::new(GoodService::new(store, cache)),
    };
    build_app_router(state, &config)
}

/// Full stack over PostgreSQL with an in-memory cache.
pub fn build_pg_app(pool: PgPool, cache: Arc<MemoryCache>) -> Router {
    build_test_app(Arc::new(PgGoodStore::new(pool)), cache)
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory [`GoodStore`] that counts calls.
#[derive(Default)]
pub struct FakeStore {
    goods: Mutex<BTreeMap<DbId, Good>>,
    pub get_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub patch_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// Make `patch` report that the row vanished after its existence check.
    pub lose_patched_rows: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a good directly, bypassing the counters.
    pub fn seed(&self, id: DbId, project_id: DbId, name: &str) -> Good {
        let good = Good {
            id,
            project_id,
            name: name.to_string(),
            description: format!("{name} description"),
            priority: None,
            removed: false,
            created_at: Utc::now(),
        };
        self.goods.lock().unwrap().insert(id, good.clone());
        good
    }

    /// Overwrite a stored good without touching the cache.
    pub fn rename(&self, id: DbId, name: &str) {
        if let Some(good) = self.goods.lock().unwrap().get_mut(&id) {
            good.name = name.to_string();
        }
    }

    pub fn len(&self) -> usize {
        self.goods.lock().unwrap().len()
    }

    pub fn stored(&self, id: DbId) -> Option<Good> {
        self.goods.lock().unwrap().get(&id).cloned()
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoodStore for FakeStore {
    async fn get(&self, id: DbId, project_id: DbId) -> Result<Good, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.goods
            .lock()
            .unwrap()
            .get(&id)
            .filter(|g| g.project_id == project_id)
            .cloned()
            .ok_or(StoreError::NotFound { id, project_id })
    }

    async fn save(&self, input: &NewGood) -> Result<Good, StoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let mut goods = self.goods.lock().unwrap();
        let id = match input.id {
            Some(id) if goods.contains_key(&id) => return Err(StoreError::AlreadyExists { id }),
            Some(id) => id,
            None => goods.keys().next_back().map_or(1, |max| max + 1),
        };
        let good = Good {
            id,
            project_id: input.project_id,
            name: input.name.clone(),
            description: input.description.clone(),
            priority: input.priority,
            removed: input.removed,
            created_at: Utc::now(),
        };
        goods.insert(id, good.clone());
        Ok(good)
    }

    async fn patch(&self, patch: &GoodPatch) -> Result<Good, StoreError> {
        self.patch_calls.fetch_add(1, Ordering::SeqCst);
        let mut goods = self.goods.lock().unwrap();
        let good = goods
            .get_mut(&patch.id)
            .filter(|g| g.project_id == patch.project_id)
            .ok_or(StoreError::NotFound {
                id: patch.id,
                project_id: patch.project_id,
            })?;
        if self.lose_patched_rows.load(Ordering::SeqCst) {
            return Err(StoreError::InsertionFailure);
        }
        good.name = patch.name.clone();
        good.description = patch.description.clone();
        good.priority = patch.priority;
        good.removed = patch.removed;
        Ok(good.clone())
    }

    async fn delete(&self, id: DbId, project_id: DbId) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut goods = self.goods.lock().unwrap();
        match goods.get(&id) {
            Some(g) if g.project_id == project_id => {
                goods.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound { id, project_id }),
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Good>, StoreError> {
        Ok(self
            .goods
            .lock()
            .unwrap()
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// [`GoodCache`] whose every operation fails.
pub struct BrokenCache;

fn broken() -> CacheError {
    CacheError::Serialization(serde_json::from_str::<Good>("not json").unwrap_err())
}

#[async_trait]
impl GoodCache for BrokenCache {
    async fn get(&self, _key: &CacheKey) -> Result<Good, CacheError> {
        Err(broken())
    }

    async fn set(&self, _key: &CacheKey, _good: &Good) -> Result<(), CacheError> {
        Err(broken())
    }

    async fn delete(&self, _key: &CacheKey) -> Result<(), CacheError> {
        Err(broken())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(broken())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
