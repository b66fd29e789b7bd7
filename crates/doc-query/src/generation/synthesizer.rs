//! Answer synthesis with per-question failure containment
//!
//! A failed model call or unparseable model output degrades into an error
//! slot for that question; sibling questions in the same batch are
//! unaffected.

use std::sync::Arc;

use crate::config::AnswerMode;
use crate::error::{Error, Result};
use crate::types::response::{Answer, AnswerSlot, StructuredAnswer};

use super::chat::{ChatClient, ChatMessage};
use super::prompt::PromptBuilder;

const NOT_FOUND_TEXT: &str = "Information not found in the document";

/// Turns a question plus selected context into one answer slot
pub struct AnswerSynthesizer {
    client: Arc<ChatClient>,
    mode: AnswerMode,
    plain_max_tokens: u32,
}

impl AnswerSynthesizer {
    /// Create a synthesizer for the configured answer mode
    pub fn new(client: Arc<ChatClient>, mode: AnswerMode, plain_max_tokens: u32) -> Self {
        Self {
            client,
            mode,
            plain_max_tokens,
        }
    }

    /// Answer one question against the selected context.
    ///
    /// An empty context short-circuits to a "not found" answer without
    /// calling the model.
    pub async fn synthesize(&self, question: &str, context: &str) -> AnswerSlot {
        if context.trim().is_empty() {
            return match self.mode {
                AnswerMode::Structured => {
                    AnswerSlot::ok(Answer::Structured(StructuredAnswer::not_found()))
                }
                AnswerMode::Plain => {
                    AnswerSlot::ok(Answer::Plain(format!("{NOT_FOUND_TEXT}.")))
                }
            };
        }

        let result = match self.mode {
            AnswerMode::Structured => self
                .structured(question, context)
                .await
                .map(Answer::Structured),
            AnswerMode::Plain => self.plain(question, context).await.map(Answer::Plain),
        };

        match result {
            Ok(answer) => AnswerSlot::ok(answer),
            Err(e) => {
                tracing::warn!("question-level failure: {e}");
                AnswerSlot::error(e.to_string())
            }
        }
    }

    async fn structured(&self, question: &str, context: &str) -> Result<StructuredAnswer> {
        let user = PromptBuilder::structured_user(question, context);
        let messages = [
            ChatMessage {
                role: "system",
                content: PromptBuilder::STRUCTURED_SYSTEM,
            },
            ChatMessage {
                role: "user",
                content: &user,
            },
        ];

        let raw = self.client.complete(&messages, None).await?;
        parse_structured(&raw)
    }

    async fn plain(&self, question: &str, context: &str) -> Result<String> {
        let prompt = PromptBuilder::plain(question, context);
        let messages = [ChatMessage {
            role: "user",
            content: &prompt,
        }];

        let raw = self
            .client
            .complete(&messages, Some(self.plain_max_tokens))
            .await?;
        Ok(raw.trim().to_string())
    }
}

/// Parse and validate the model's JSON output against the answer schema.
pub fn parse_structured(raw: &str) -> Result<StructuredAnswer> {
    let json = extract_json(raw)
        .ok_or_else(|| Error::Model("model response contained no JSON object".to_string()))?;

    serde_json::from_str(json)
        .map_err(|e| Error::Model(format!("model response failed schema validation: {e}")))
}

/// The model sometimes wraps its JSON in code fences or surrounding prose;
/// take the outermost object.
fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}
