//! Selector strategies behind a common context-source contract

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{AppConfig, SelectorStrategy};
use crate::error::Result;
use crate::ingestion::TextChunker;
use crate::providers::EmbeddingProvider;
use crate::types::LoadedDocument;

use super::index::ChunkIndex;
use super::lexical::LexicalContext;

/// A per-request source of question contexts.
///
/// Built once per document and reused for every question in the batch; for
/// the embedding strategy this is what amortizes index construction across
/// the batch instead of rebuilding per question.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Bounded context for one question
    async fn context_for(&self, question: &str) -> Result<String>;
}

/// Embedding-similarity context source
pub struct EmbeddingContext {
    index: ChunkIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl EmbeddingContext {
    /// Chunk the document, embed every chunk once, and index the result.
    pub async fn build(
        doc: &LoadedDocument,
        chunker: &TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Result<Self> {
        let chunks = chunker.chunk(&doc.full_text(), &doc.filename);
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();

        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            embedder.embed_batch(&texts).await?
        };

        let index = ChunkIndex::build(chunks, embeddings)?;
        tracing::debug!(
            chunks = index.len(),
            provider = embedder.name(),
            "built embedding index"
        );

        Ok(Self {
            index,
            embedder,
            top_k,
        })
    }
}

#[async_trait]
impl ContextSource for EmbeddingContext {
    async fn context_for(&self, question: &str) -> Result<String> {
        if self.index.is_empty() {
            return Ok(String::new());
        }

        let query = self.embedder.embed(question).await?;
        let hits = self.index.search(&query, self.top_k);

        // Concatenate in retrieval order, most similar first.
        let parts: Vec<&str> = hits.iter().map(|hit| hit.chunk.content.as_str()).collect();
        Ok(parts.join("\n\n"))
    }
}

/// Build the configured context source for one document.
pub async fn build_context_source(
    doc: &LoadedDocument,
    config: &AppConfig,
    embedder: &Arc<dyn EmbeddingProvider>,
) -> Result<Box<dyn ContextSource>> {
    match config.retrieval.strategy {
        SelectorStrategy::Lexical => Ok(Box::new(LexicalContext::new(
            &doc.full_text(),
            config.retrieval.max_context_length,
        ))),
        SelectorStrategy::Embedding => {
            let chunker = TextChunker::new(
                config.chunking.chunk_size,
                config.chunking.chunk_overlap,
            )?;
            let source =
                EmbeddingContext::build(doc, &chunker, Arc::clone(embedder), config.retrieval.top_k)
                    .await?;
            Ok(Box::new(source))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentKind;

    /// Deterministic embedder: counts occurrences of a fixed keyword list.
    struct KeywordEmbedder;

    #[async_trait]
    impl EmbeddingProvider for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let lower = text.to_lowercase();
            let keywords = ["password", "renew", "lunch"];
            Ok(keywords
                .iter()
                .map(|kw| lower.matches(kw).count() as f32)
                .collect())
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn name(&self) -> &str {
            "keyword-test"
        }
    }

    fn doc(segments: &[&str]) -> LoadedDocument {
        LoadedDocument {
            filename: "policy.txt".to_string(),
            kind: DocumentKind::Txt,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn embedding_source_retrieves_the_matching_chunk() {
        let doc = doc(&[
            "Passwords must be 8 characters long.",
            "Renew your badge every 90 days.",
            "Lunch is served at noon.",
        ]);
        let chunker = TextChunker::new(40, 5).unwrap();
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(KeywordEmbedder);

        let source = EmbeddingContext::build(&doc, &chunker, embedder, 1)
            .await
            .unwrap();
        let context = source.context_for("When should I renew?").await.unwrap();

        assert!(context.contains("Renew"));
        assert!(!context.contains("Lunch"));
    }

    #[tokio::test]
    async fn empty_document_yields_empty_context() {
        let doc = doc(&[]);
        let chunker = TextChunker::new(40, 5).unwrap();
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(KeywordEmbedder);

        let source = EmbeddingContext::build(&doc, &chunker, embedder, 3)
            .await
            .unwrap();
        let context = source.context_for("anything").await.unwrap();
        assert_eq!(context, "");
    }

    #[tokio::test]
    async fn same_question_selects_the_same_context() {
        let doc = doc(&[
            "Passwords must be 8 characters long.",
            "Renew your badge every 90 days.",
        ]);
        let chunker = TextChunker::new(40, 5).unwrap();
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(KeywordEmbedder);

        let source = EmbeddingContext::build(&doc, &chunker, embedder, 2)
            .await
            .unwrap();
        let first = source.context_for("password rules?").await.unwrap();
        let second = source.context_for("password rules?").await.unwrap();
        assert_eq!(first, second);
    }
}
