//! Document query server binary
//!
//! Run with: cargo run -p doc-query --bin doc-query-server

use doc_query::{config::AppConfig, server::QueryServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_query=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.llm.model);
    tracing::info!("  - Selector strategy: {:?}", config.retrieval.strategy);
    tracing::info!("  - Answer mode: {:?}", config.llm.answer_mode);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);

    if config.llm.api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; every question will fail until it is provided");
    }

    let server = QueryServer::new(config)?;

    println!("\nServer starting...");
    println!("  Web UI:  http://{}", server.address());
    println!("  Health:  http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/v1/query  - ask questions about a document URL");
    println!("  POST /api/v1/upload - ask questions about an uploaded file");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
