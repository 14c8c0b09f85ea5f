use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use goods_api::config::ServerConfig;
use goods_api::router::build_app_router;
use goods_api::services::GoodService;
use goods_api::state::AppState;
use goods_cache::{GoodCache, MemoryCache, RedisCache};
use goods_db::{GoodStore, PgGoodStore};
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    // --- Tracing ---
    init_tracing(&config);
    tracing::info!(
        env = %config.app_env,
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting goods-service"
    );
    tracing::debug!("Debug messages are enabled");

    // --- Database ---
    let pool = goods_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    goods_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    goods_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let store: Arc<dyn GoodStore> = Arc::new(PgGoodStore::new(pool));

    // --- Cache ---
    let cache = connect_cache(&config).await;

    // --- App state ---
    let state = AppState {
        goods: Arc::new(GoodService::new(store, cache)),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting http server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                notify.notify_one();
            })
            .await
    });

    tokio::select! {
        res = &mut server => {
            res.context("Server task panicked")?.context("Server error")?;
            return Ok(());
        }
        () = signalled.notified() => {}
    }

    // --- Drain ---
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, &mut server).await {
        Ok(res) => res.context("Server task panicked")?.context("Server error")?,
        Err(_) => {
            tracing::warn!(?drain, "In-flight requests did not drain in time, aborting");
            server.abort();
        }
    }

    tracing::info!("Http server stopped");
    Ok(())
}

/// Install the global subscriber: human-readable logs locally, JSON in prod.
fn init_tracing(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "goods_api=debug,goods_db=debug,goods_cache=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect to Redis when configured, otherwise cache in process memory.
///
/// The cache is best-effort, so an unreachable Redis does not stop startup.
async fn connect_cache(config: &ServerConfig) -> Arc<dyn GoodCache> {
    let ttl = config.cache_ttl();
    let capacity = config.cache_capacity;

    let Some(url) = config.redis_url.as_deref() else {
        tracing::info!(?ttl, capacity, "REDIS_URL not set, using in-memory cache");
        return Arc::new(MemoryCache::with_capacity(ttl, capacity));
    };

    match RedisCache::connect(url, config.redis_password.as_deref(), ttl).await {
        Ok(cache) => {
            tracing::info!(?ttl, "Connected to Redis cache");
            Arc::new(cache)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed connecting to Redis, using in-memory cache");
            Arc::new(MemoryCache::with_capacity(ttl, capacity))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed the corresponding branch never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
