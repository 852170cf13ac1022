//! enricher - Person catalog service with demographic enrichment
//!
//! Creation requests carrying only name fields are enriched with inferred
//! age, sex, and nationality guesses from three public inference APIs,
//! persisted in PostgreSQL, and exposed through CRUD endpoints with
//! filterable, paginated listing.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use enricher::config::Config;
use enricher::db::postgres::PostgresStorage;
use enricher::enrich::Enricher;
use enricher::service::UserService;
use enricher::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting enricher v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(env = %config.env, "configuration loaded");

    let pool = match enricher::db::connect(&config.db_url).await {
        Ok(pool) => {
            info!("connected to database");
            pool
        }
        Err(e) => {
            error!("failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let storage = PostgresStorage::new(pool);
    let service = UserService::new(Arc::new(storage));
    let enricher = Enricher::new()?;

    let state = AppState::new(service, enricher);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("enricher listening on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
