mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

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

    info!("Starting Resume Builder v{}", env!("CARGO_PKG_VERSION"));

    // Initialize session store
    let sessions = build_session_store(&config)?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.generation_timeout.as_secs()
    );

    if !config.font_path.exists() {
        tracing::warn!(
            "PDF font not found at {}; downloads will fail until it is installed",
            config.font_path.display()
        );
    }

    let state = AppState {
        config: config.clone(),
        generator: Arc::new(llm),
        sessions,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is configured, process memory otherwise.
fn build_session_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Session store: Redis");
            Ok(Arc::new(RedisSessionStore::new(client, config.session_ttl)))
        }
        None => {
            info!("Session store: in-memory");
            Ok(Arc::new(MemorySessionStore::new(config.session_ttl)))
        }
    }
}
