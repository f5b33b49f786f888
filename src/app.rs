/*
 * Responsibility
 * - Config -> dependencies (DB pool, account lookup, codec, gates) -> Router
 * - Apply cross-cutting middleware (CORS, access log, request id, limits)
 * - axum::serve() until Ctrl-C
 */
use std::{panic, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{cors, http};
use crate::services::accounts::{AccountLookup, PgAccounts};
use crate::services::auth::{SystemClock, build_state};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,fx_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");
        default_hook(info);
    }));
}

pub async fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env()?;
    tracing::info!(?config, "starting fx-gate");

    let db = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;
    let accounts: Arc<dyn AccountLookup> = Arc::new(PgAccounts::new(db));

    let state = build_state(&config, Arc::new(SystemClock), accounts)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = cors::apply(router, config);
    http::apply(router)
}
