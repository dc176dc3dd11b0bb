mod config;
mod errors;
mod export;
mod generation;
mod llm_client;
mod locale;
mod models;
mod routes;
mod state;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::ContentGenerator;
use crate::llm_client::{AnthropicClient, GenerationClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::workflow::store::SessionStore;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Assessor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model adapter and probe it once; a failed probe is fatal
    let anthropic = AnthropicClient::with_api_url(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    )?;
    let policy = config.retry_policy();
    info!(
        "LLM client initialized (model: {}, attempts: {}, worst-case backoff: {}ms)",
        llm_client::MODEL,
        policy.max_attempts,
        policy.total_backoff().as_millis()
    );
    let client = GenerationClient::connect(Arc::new(anthropic), policy).await?;

    // Session registry with idle eviction
    let sessions = SessionStore::new(config.session_ttl);
    sessions.spawn_sweeper(SESSION_SWEEP_INTERVAL);
    info!("Idle sessions expire after {} minutes", config.session_ttl.as_secs() / 60);

    // Build app state
    let state = AppState {
        sessions,
        generator: Arc::new(ContentGenerator::new(client)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
