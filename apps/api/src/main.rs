mod assistant;
mod config;
mod errors;
mod export;
mod gate;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::{Assistant, LoadingTracker};
use crate::config::Config;
use crate::export::{Exporter, HttpAssetFetcher, ResvgRasterizer};
use crate::gate::GateConfig;
use crate::layout::StaticMetrics;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
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

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generative-text client
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; assistant features will return their fallbacks");
    }
    info!("LLM client initialized (model: {})", gemini.model());

    // Export pipeline shares the HTTP connection pool for remote images
    let fetcher = HttpAssetFetcher::new(gemini.http(), config.asset_fetch_timeout);
    let rasterizer = tokio::task::spawn_blocking(ResvgRasterizer::new).await?;
    info!("Rasterizer initialized");

    let gate = GateConfig {
        delay: config.gate_delay,
        merchant_id: config.gate_merchant_id.clone(),
        amount: config.gate_amount.clone(),
        ..GateConfig::default()
    };

    // Build app state
    let state = AppState {
        session: SessionStore::default(),
        assistant: Assistant::new(Arc::new(gemini)),
        loading: LoadingTracker::new(),
        exporter: Exporter::new(Arc::new(fetcher), Arc::new(rasterizer)),
        gate,
        measurer: Arc::new(StaticMetrics),
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
