//! CDM Insights REST API server binary.
//!
//! ## Purpose
//! Serves the read-only analytics endpoints over the observational-data
//! schema, with OpenAPI/Swagger UI.
//!
//! ## Environment Variables
//! - `DB_URL`: Postgres connection string (required)
//! - `CDM_REST_ADDR`: server address (default: "0.0.0.0:3000")
//! - `CDM_MAX_PAGE_LIMIT`: upper bound on the `limit` query parameter
//!   (default: 1000)

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use cdm_core::config::max_page_limit_from_env_value;
use cdm_core::{CdmError, CoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("cdm_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CDM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    // Missing DB_URL is fatal before anything binds.
    let database_url = std::env::var("DB_URL").map_err(|_| CdmError::Configuration("DB_URL"))?;
    let max_page_limit = max_page_limit_from_env_value(std::env::var("CDM_MAX_PAGE_LIMIT").ok())?;
    let cfg = Arc::new(CoreConfig::new(database_url, max_page_limit)?);

    tracing::info!("-- Starting CDM Insights REST API on {}", addr);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .test_before_acquire(true)
        .connect(cfg.database_url())
        .await?;

    // Startup health check: fail fast if the database is unreachable.
    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::info!("database connected");

    let app = api_rest::router(AppState {
        cfg,
        pool: pool.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Dispose the pool once the server has drained.
    pool.close().await;
    tracing::info!("database disconnected");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
    }
}
