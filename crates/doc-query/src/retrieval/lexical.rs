//! Lexical word-overlap context selection
//!
//! Scores each paragraph by the number of distinct words it shares with the
//! question, then greedily packs the best paragraphs into a character
//! budget. No embeddings, no network calls.

use async_trait::async_trait;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

use super::selector::ContextSource;

/// Paragraphs of one document, pre-tokenized for overlap scoring
pub struct LexicalContext {
    paragraphs: Vec<Paragraph>,
    full_text: String,
    max_length: usize,
}

struct Paragraph {
    text: String,
    words: HashSet<String>,
}

impl LexicalContext {
    /// Build the paragraph list from a document's full text.
    pub fn new(full_text: &str, max_length: usize) -> Self {
        let paragraphs = full_text
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(|block| Paragraph {
                text: block.to_string(),
                words: word_set(block),
            })
            .collect();

        Self {
            paragraphs,
            full_text: full_text.to_string(),
            max_length,
        }
    }

    /// Assemble a bounded context for one question.
    ///
    /// Paragraphs with zero overlap are never included; equal scores keep
    /// their original document order (the sort is stable). If nothing scores
    /// above zero the first `max_length` characters of the document are
    /// returned instead, so the model still sees something to decline on.
    pub fn select(&self, question: &str) -> String {
        let question_words = word_set(question);

        let mut scored: Vec<(usize, &Paragraph)> = self
            .paragraphs
            .iter()
            .map(|paragraph| {
                (
                    paragraph.words.intersection(&question_words).count(),
                    paragraph,
                )
            })
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut context = String::new();
        for (_, paragraph) in &scored {
            let separator = if context.is_empty() { 0 } else { 2 };
            if context.len() + separator + paragraph.text.len() > self.max_length {
                break;
            }
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&paragraph.text);
        }

        if context.is_empty() {
            context = truncate_on_char_boundary(&self.full_text, self.max_length);
        }

        context
    }
}

#[async_trait]
impl ContextSource for LexicalContext {
    async fn context_for(&self, question: &str) -> Result<String> {
        Ok(self.select(question))
    }
}

/// Distinct lowercased words of a text.
fn word_set(text: &str) -> HashSet<String> {
    text.unicode_words().map(|word| word.to_lowercase()).collect()
}

fn truncate_on_char_boundary(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let mut end = max_len;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
