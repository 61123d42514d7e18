//! Portfolio chat server
//!
//! Serves the ask proxy, the site copy and, optionally, the built UI.

use portfolio_chat::api::{create_router, AppState};
use portfolio_chat::config::ServerConfig;
use portfolio_chat::llm;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let llm = llm::build_service(&config.llm)?;
    match &llm {
        Some(service) => tracing::info!(model = %service.model_id(), "Completion provider configured"),
        None => tracing::warn!("OPENROUTER_API_KEY is not set. /api/ask will answer 500."),
    }

    if let Some(dir) = &config.static_dir {
        tracing::info!(path = %dir.display(), "Serving static files");
    }
    let state = AppState::new(llm).with_static_dir(config.static_dir);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Portfolio chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
