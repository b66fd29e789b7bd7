//! Configuration for the document query service
//!
//! Defaults mirror the service's standard deployment; every knob can be
//! overridden through environment variables (a `.env` file is honored when
//! the binary loads it via `dotenvy`).

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Hosted model configuration
    pub llm: LlmConfig,
    /// Embedding configuration (used by the embedding selector strategy)
    pub embeddings: EmbeddingConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes
    pub max_upload_size: usize,
    /// Timeout for fetching documents by URL, in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_size: 50 * 1024 * 1024, // 50MB
            fetch_timeout_secs: 30,
        }
    }
}

/// Hosted model (chat completions) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    pub api_base: String,
    /// API key for the hosted model
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Optional team token (accepted but not enforced)
    pub team_token: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Token cap for plain-mode answers
    pub plain_max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests (0 = single attempt)
    pub max_retries: u32,
    /// Answer shape returned to clients
    pub answer_mode: AnswerMode,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: "llama-3.3-70b-versatile".to_string(),
            team_token: None,
            temperature: 0.1,
            plain_max_tokens: 100,
            timeout_secs: 120,
            max_retries: 0,
            answer_mode: AnswerMode::Structured,
        }
    }
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding server base URL (Ollama-compatible)
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            timeout_secs: 60,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 600,
            chunk_overlap: 80,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Selector strategy
    pub strategy: SelectorStrategy,
    /// Character budget for assembled context (lexical strategy)
    pub max_context_length: usize,
    /// Number of chunks to retrieve (embedding strategy)
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            strategy: SelectorStrategy::Lexical,
            max_context_length: 3000,
            top_k: 8,
        }
    }
}

/// Context selection strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorStrategy {
    /// Word-overlap scoring with greedy budget packing
    #[default]
    Lexical,
    /// Embedding similarity search over chunked text
    Embedding,
}

impl FromStr for SelectorStrategy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "embedding" => Ok(Self::Embedding),
            _ => Err(()),
        }
    }
}

/// Answer shape returned for each question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    /// Short free-text answer
    Plain,
    /// JSON record with decision, justification and supporting clauses
    #[default]
    Structured,
}

impl FromStr for AnswerMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "structured" => Ok(Self::Structured),
            _ => Err(()),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = env_var("GROQ_API_KEY") {
            config.llm.api_key = Some(value);
        }
        if let Some(value) = env_var("MODEL_NAME") {
            config.llm.model = value;
        }
        if let Some(value) = env_var("MODEL_API_BASE") {
            config.llm.api_base = value;
        }
        if let Some(value) = env_var("TEAM_TOKEN") {
            config.llm.team_token = Some(value);
        }
        if let Some(value) = env_var("ANSWER_MODE") {
            config.llm.answer_mode = value
                .parse()
                .map_err(|()| Error::Config(format!("invalid ANSWER_MODE: {value}")))?;
        }
        if let Some(value) = env_var("MODEL_TIMEOUT_SECS") {
            config.llm.timeout_secs = parse_env("MODEL_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = env_var("MODEL_MAX_RETRIES") {
            config.llm.max_retries = parse_env("MODEL_MAX_RETRIES", &value)?;
        }
        if let Some(value) = env_var("MODEL_TEMPERATURE") {
            config.llm.temperature = parse_env("MODEL_TEMPERATURE", &value)?;
        }

        if let Some(value) = env_var("SELECTOR_STRATEGY") {
            config.retrieval.strategy = value
                .parse()
                .map_err(|()| Error::Config(format!("invalid SELECTOR_STRATEGY: {value}")))?;
        }
        if let Some(value) = env_var("MAX_CONTEXT_LENGTH") {
            config.retrieval.max_context_length = parse_env("MAX_CONTEXT_LENGTH", &value)?;
        }
        if let Some(value) = env_var("TOP_K") {
            config.retrieval.top_k = parse_env("TOP_K", &value)?;
        }

        if let Some(value) = env_var("CHUNK_SIZE") {
            config.chunking.chunk_size = parse_env("CHUNK_SIZE", &value)?;
        }
        if let Some(value) = env_var("CHUNK_OVERLAP") {
            config.chunking.chunk_overlap = parse_env("CHUNK_OVERLAP", &value)?;
        }

        if let Some(value) = env_var("EMBEDDING_BASE_URL") {
            config.embeddings.base_url = value;
        }
        if let Some(value) = env_var("EMBEDDING_MODEL") {
            config.embeddings.model = value;
        }
        if let Some(value) = env_var("EMBEDDING_DIMENSION") {
            config.embeddings.dimensions = parse_env("EMBEDDING_DIMENSION", &value)?;
        }

        if let Some(value) = env_var("SERVER_HOST") {
            config.server.host = value;
        }
        if let Some(value) = env_var("SERVER_PORT") {
            config.server.port = parse_env("SERVER_PORT", &value)?;
        }
        if let Some(value) = env_var("FETCH_TIMEOUT_SECS") {
            config.server.fetch_timeout_secs = parse_env("FETCH_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = env_var("MAX_UPLOAD_SIZE") {
            config.server.max_upload_size = parse_env("MAX_UPLOAD_SIZE", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field invariants.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.max_context_length == 0 {
            return Err(Error::Config(
                "max context length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("invalid value for {key}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.retrieval.strategy, SelectorStrategy::Lexical);
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        let mut config = AppConfig::default();
        config.chunking.chunk_size = 100;
        config.chunking.chunk_overlap = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn strategy_and_mode_parse_case_insensitively() {
        assert_eq!(
            "Embedding".parse::<SelectorStrategy>(),
            Ok(SelectorStrategy::Embedding)
        );
        assert_eq!("PLAIN".parse::<AnswerMode>(), Ok(AnswerMode::Plain));
        assert!("vector".parse::<SelectorStrategy>().is_err());
    }
}
