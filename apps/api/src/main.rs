mod bravery;
mod catalog;
mod config;
mod db;
mod errors;
mod generation;
mod library;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::generation::trends::TrendCache;
use crate::library::{CampaignStore, MemoryCampaignStore, PgCampaignStore};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Campaign API v{}", env!("CARGO_PKG_VERSION"));

    // Load the reference catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled()?,
    };
    info!("Reference catalog loaded ({} campaigns)", catalog.len());

    // Initialize the campaign library
    let store: Arc<dyn CampaignStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgCampaignStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, campaign library is in memory");
            Arc::new(MemoryCampaignStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.llm_timeout_secs,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    if let Some(seed) = config.match_seed {
        info!("Matching uses fixed seed {seed}");
    }

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        catalog: Arc::new(catalog),
        store,
        trends: Arc::new(TrendCache::new()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
