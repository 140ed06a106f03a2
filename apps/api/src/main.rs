mod config;
mod db;
mod errors;
mod insights;
mod interview;
mod models;
mod roadmap;
mod roles;
mod routes;
mod seed;
mod state;
mod study;

use std::net::SocketAddr;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::seed::{seed_if_empty, Catalog};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("naviq_api={},tower_http=info", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NAVIQ API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    if config.seed_on_startup {
        let catalog = Catalog::load(config.seed_file.as_deref())?;
        seed_if_empty(&db, &catalog).await?;
    } else {
        info!("SEED_ON_STARTUP disabled, leaving database as is");
    }

    let app = build_router(AppState { db }).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
