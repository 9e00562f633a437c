/*
 * Responsibility
 * - load Config, build shared services and both database pools
 * - assemble the Router and apply the global middleware stack
 * - serve with axum::serve()
 */
use std::time::Duration;
use std::{panic, process, sync::Arc};

use axum::Router;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::repos::retry::RetryPolicy;
use crate::services::auth::{AuthService, BoundedClaimCache, JwtIssuer};
use crate::services::clock::{Clock, SystemClock};
use crate::state::AppState;

const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,hr_payroll=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly. production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting HR/payroll API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| {
            tracing::error!(addr = %config.addr, error = %e, "failed to bind");
            AppError::Internal
        })?;
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!(error = %e, "server stopped");
        AppError::Internal
    })?;

    Ok(())
}

fn connect_pool(url: &str, max_connections: u32, name: &'static str) -> Result<PgPool, AppError> {
    // Lazy: the API comes up even when a database is down; /health reports it.
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect_lazy(url)
        .map_err(|e| {
            tracing::error!(database = name, error = %e, "invalid database url");
            AppError::Internal
        })
}

pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let hr_db = connect_pool(&config.hr_database_url, config.db_max_connections, "hr")?;
    let payroll_db = connect_pool(
        &config.payroll_database_url,
        config.db_max_connections,
        "payroll",
    )?;

    let retry = RetryPolicy::new(config.db_retry_attempts, config.db_retry_delay);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let cache = Arc::new(BoundedClaimCache::new(config.claim_cache_capacity));
    tracing::info!(capacity = cache.capacity(), "claim cache ready");

    let auth = AuthService::new(
        &config.jwt_secret,
        config.jwt_algorithm,
        cache,
        clock.clone(),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "token verifier setup failed");
        AppError::Internal
    })?;

    let issuer = JwtIssuer::new(
        &config.jwt_secret,
        config.jwt_algorithm,
        config.access_token_ttl_seconds,
        clock.clone(),
    );
    tracing::info!(
        algorithm = ?config.jwt_algorithm,
        ttl_seconds = issuer.ttl_seconds(),
        "access tokens configured"
    );

    Ok(AppState::new(
        config.app_env,
        hr_db,
        payroll_db,
        retry,
        Arc::new(auth),
        Arc::new(issuer),
        clock,
        config.bcrypt_cost,
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
