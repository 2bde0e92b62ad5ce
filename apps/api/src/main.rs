mod catalog;
mod config;
mod errors;
mod llm_client;
mod optimizer;
mod routes;
mod sessions;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::{ProfileCatalog, StaticCatalog};
use crate::config::Config;
use crate::llm_client::AnthropicProvider;
use crate::optimizer::orchestrator::{OptimizationOrchestrator, OrchestratorSettings};
use crate::routes::build_router;
use crate::sessions::memory::MemorySessionStore;
use crate::sessions::postgres::PgSessionStore;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prompt Forge API v{}", env!("CARGO_PKG_VERSION"));

    // Model profile catalog
    let catalog: Arc<dyn ProfileCatalog> = match &config.model_catalog_path {
        Some(path) => Arc::new(StaticCatalog::from_file(path)?),
        None => Arc::new(StaticCatalog::builtin()),
    };
    info!("Model catalog loaded ({} profiles)", catalog.list().len());

    // Session history
    let sessions: Arc<dyn SessionStore> = match &config.database_url {
        Some(url) => Arc::new(PgSessionStore::connect(url).await?),
        None => {
            warn!("DATABASE_URL not set; session history is kept in memory only");
            Arc::new(MemorySessionStore::new())
        }
    };

    // Completion provider
    let provider = Arc::new(AnthropicProvider::new(config.anthropic_api_key.clone())?);
    info!(
        "Completion provider initialized (model: {}, timeout: {:?})",
        config.optimizer_model, config.provider_timeout
    );

    let optimizer = Arc::new(OptimizationOrchestrator::new(
        Arc::clone(&catalog),
        provider,
        Arc::clone(&sessions),
        OrchestratorSettings {
            optimizer_model: config.optimizer_model.clone(),
            max_tokens: config.optimizer_max_tokens,
            provider_timeout: config.provider_timeout,
        },
    ));

    // Build app state
    let state = AppState {
        catalog,
        optimizer,
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
