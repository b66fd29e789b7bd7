//! In-memory similarity index over chunk embeddings
//!
//! The index lives for a single request: it is built once from a document's
//! chunks and queried for every question in the batch.

use crate::error::{Error, Result};
use crate::types::Chunk;

/// A chunk matched by a similarity search
#[derive(Debug)]
pub struct SearchHit<'a> {
    /// The retrieved chunk
    pub chunk: &'a Chunk,
    /// Cosine similarity (-1.0 to 1.0, higher is more similar)
    pub similarity: f32,
}

/// Chunks paired with their embeddings, searchable by cosine similarity
pub struct ChunkIndex {
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
}

impl ChunkIndex {
    /// Build an index from chunks and their embeddings, in matching order.
    pub fn build(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(Error::internal(format!(
                "chunk count ({}) does not match embedding count ({})",
                chunks.len(),
                embeddings.len()
            )));
        }

        Ok(Self { chunks, embeddings })
    }

    /// Return the `top_k` chunks nearest to `query`, most similar first.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<SearchHit<'_>> {
        let mut hits: Vec<SearchHit<'_>> = self
            .chunks
            .iter()
            .zip(self.embeddings.iter())
            .map(|(chunk, embedding)| SearchHit {
                chunk,
                similarity: cosine_similarity(query, embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        hits
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, index: u32) -> Chunk {
        Chunk {
            content: content.to_string(),
            source: "doc.txt".to_string(),
            index,
        }
    }

    #[test]
    fn build_rejects_mismatched_lengths() {
        let chunks = vec![chunk("a", 0)];
        assert!(ChunkIndex::build(chunks, vec![]).is_err());
    }

    #[test]
    fn search_returns_nearest_first() {
        let chunks = vec![chunk("north", 0), chunk("east", 1), chunk("diagonal", 2)];
        let embeddings = vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.7, 0.7],
        ];
        let index = ChunkIndex::build(chunks, embeddings).unwrap();

        let hits = index.search(&[0.0, 1.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.content, "north");
        assert_eq!(hits[1].chunk.content, "diagonal");
        assert!(hits[0].similarity > hits[1].similarity);
    }

    #[test]
    fn search_on_empty_index_returns_nothing() {
        let index = ChunkIndex::build(vec![], vec![]).unwrap();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
