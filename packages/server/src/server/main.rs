// Main entry point for the llms.txt generator service

use std::sync::Arc;

use anyhow::{Context, Result};
use llmstxt_core::kernel::FirecrawlProvider;
use llmstxt_core::server::{build_router, AppState};
use llmstxt_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,llmstxt_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LLMs.txt Generator API");

    // Load configuration; refuses to start without a provider credential
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let provider = FirecrawlProvider::new(config.firecrawl_api_key.clone())
        .context("Failed to create Firecrawl client")?;

    let state = AppState::new(Arc::new(provider)).with_output_file(config.output_file.clone());
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Generate endpoint: http://localhost:{}/generate-llms-txt", config.port);
    tracing::info!("Status endpoint: http://localhost:{}/crawl-status/{{job_id}}", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
