//! Shared application state
//!
//! Every shared member is constructed once at startup and read-only
//! afterwards; the embedding provider is injected explicitly rather than
//! living behind a process-wide global.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::generation::{AnswerSynthesizer, ChatClient};
use crate::providers::{EmbeddingProvider, OllamaEmbedder};

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Embedding provider (used by the embedding selector strategy)
    embedder: Arc<dyn EmbeddingProvider>,
    /// Answer synthesizer wrapping the hosted model client
    synthesizer: AnswerSynthesizer,
    /// HTTP client for fetching documents by URL
    fetch_client: reqwest::Client,
}

impl AppState {
    /// Create state with the default embedding provider.
    pub fn new(config: AppConfig) -> Result<Self> {
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(&config.embeddings)?);
        Self::with_embedder(config, embedder)
    }

    /// Create state with an injected embedding provider.
    pub fn with_embedder(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let chat = Arc::new(ChatClient::new(&config.llm)?);
        let synthesizer = AnswerSynthesizer::new(
            chat,
            config.llm.answer_mode,
            config.llm.plain_max_tokens,
        );

        let fetch_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.fetch_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build fetch HTTP client: {e}")))?;

        tracing::info!(
            model = %config.llm.model,
            strategy = ?config.retrieval.strategy,
            mode = ?config.llm.answer_mode,
            "application state initialized"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                synthesizer,
                fetch_client,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get the answer synthesizer
    pub fn synthesizer(&self) -> &AnswerSynthesizer {
        &self.inner.synthesizer
    }

    /// Get the document fetch client
    pub fn fetch_client(&self) -> &reqwest::Client {
        &self.inner.fetch_client
    }
}
