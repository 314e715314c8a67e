//! Kitchen Recipe Calculator - Backend Server
//!
//! Serves recipe scaling, inventory reconciliation and data export over a
//! JSON API, persisting every collection in PostgreSQL.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod middleware;
mod routes;
mod services;
mod storage;

pub use config::Config;

use config::AccountConfig;
use services::AuthService;
use storage::KitchenStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub store: KitchenStore,
    /// Accepted logins with bcrypt hashes
    pub accounts: Arc<Vec<AccountConfig>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::info!(environment = %config.environment, "Starting Kitchen Recipe Calculator Server");

    let db = connect(&config).await?;

    if config.accounts.is_empty() {
        tracing::warn!("No accounts configured, using the demo credential table");
    }
    let accounts = AuthService::load_accounts(&config)?;

    let state = AppState {
        store: KitchenStore::new(db.clone(), config.seed.load_defaults),
        db,
        config: Arc::new(config.clone()),
        accounts: Arc::new(accounts),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the pool, migrating the schema in development
async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database connection established");

    if config.is_development() {
        sqlx::migrate!("./migrations").run(&db).await?;
        tracing::info!("Migrations completed");
    }
    Ok(db)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": shared::transfer::APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "api": "/api/v1",
    }))
}
