//! Provider abstractions for embedding backends

pub mod embedding;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use ollama::OllamaEmbedder;
