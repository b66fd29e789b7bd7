//! Sliding-window text chunking

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Text chunker with configurable size and overlap.
///
/// Windows are counted in characters and advance by `chunk_size - overlap`
/// per step; the final chunk may be shorter. Identical input always yields
/// identical chunk boundaries.
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. The overlap must be smaller than the chunk size.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::Config(format!(
                "chunk overlap ({overlap}) must be smaller than chunk size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Split `text` into overlapping chunks tagged with the source filename.
    pub fn chunk(&self, text: &str, source: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, plus the end of the text, so
        // windows can be counted in chars but sliced on valid boundaries.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let total_chars = bounds.len() - 1;
        let stride = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut index = 0u32;
        loop {
            let end = (start + self.chunk_size).min(total_chars);
            chunks.push(Chunk {
                content: text[bounds[start]..bounds[end]].to_string(),
                source: source.to_string(),
                index,
            });
            if end == total_chars {
                break;
            }
            start += stride;
            index += 1;
        }

        chunks
    }
}
