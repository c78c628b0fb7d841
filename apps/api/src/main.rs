mod config;
mod errors;
mod llm_client;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ProviderMode};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::skills::service::{SkillBackend, SkillSuggester};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skills API v{}", env!("CARGO_PKG_VERSION"));

    // Fails only under MISSING_KEY_POLICY=strict without a key
    let backend = match config.provider_mode()? {
        ProviderMode::Live { api_key } => {
            let client = GeminiClient::new(api_key, config.gemini_api_base.clone())?
                .with_max_attempts(config.llm_max_attempts);
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            SkillBackend::Live(Arc::new(client))
        }
        ProviderMode::Mock => {
            if config.mock_ai {
                info!("MOCK_AI enabled, serving canned suggestions");
            } else {
                warn!("GEMINI_API_KEY is missing, falling back to mock suggestions");
            }
            SkillBackend::Mock
        }
    };

    let suggester = SkillSuggester::new(
        backend,
        config.response_shape,
        config.max_items,
        config.llm_timeout,
    );
    info!(
        "Suggestion pipeline: shape={:?} max_items={} timeout={:?}",
        config.response_shape, config.max_items, config.llm_timeout
    );

    let state = AppState {
        config: config.clone(),
        suggester,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("Health: http://localhost:{}/api/health", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
