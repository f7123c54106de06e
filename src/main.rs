use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;

#[cfg(test)]
mod testing;

use crate::config::{AuthConfig, Config};
use crate::db::{PgStore, StockStore};

/// Shared application state — cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StockStore>,
    pub auth: Arc<AuthConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,wgss_stock_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    info!(max_connections = config.max_connections, "Database connection pool established.");

    if config.run_migrations {
        // Installs the reduce/restore stock procedures alongside the tables
        info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations complete.");
    }

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        auth: Arc::new(config.auth.clone()),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    // ── Admin (x-admin-key) ─────────────────────────────────────────────────
    let admin = Router::new()
        .route("/admin/sites", get(handlers::sites::list_sites))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin_key,
        ));

    // ── Storefront integration (x-wgss-source) ──────────────────────────────
    let storefront = Router::new()
        .route("/stock/reduce", post(handlers::stock::reduce_stock))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_source_key,
        ));

    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Unauthenticated stock writes ────────────────────────────────────
        .route("/stock/manual", post(handlers::stock::set_manual_stock))
        .route("/stock/restore", post(handlers::stock::restore_stock))

        .merge(admin)
        .merge(storefront)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
