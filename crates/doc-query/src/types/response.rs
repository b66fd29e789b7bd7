//! Answer types returned to clients

use serde::{Deserialize, Serialize};

/// Response body: one answer slot per input question, index-aligned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answers: Vec<AnswerSlot>,
}

/// Per-question result.
///
/// Question-level failures (model call, schema validation) land here as the
/// `Error` variant instead of aborting the sibling questions in the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerSlot {
    /// The question was answered
    Ok { answer: Answer },
    /// The model call or its output failed for this question only
    Error { error: String },
}

impl AnswerSlot {
    /// Wrap a successful answer
    pub fn ok(answer: Answer) -> Self {
        Self::Ok { answer }
    }

    /// Wrap a question-level failure
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Whether this slot holds a successful answer
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// An answer in either of the two configured shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Short free-text answer
    Plain(String),
    /// Structured record parsed from the model's JSON output
    Structured(StructuredAnswer),
}

/// Structured answer record the model is instructed to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    /// Whether the document answered the question
    pub decision: Decision,
    /// Monetary or numeric amount, when the question asks for one
    pub amount: Option<f64>,
    /// Detailed answer drawn from the document
    pub justification: String,
    /// Supporting excerpts, in the order the model cited them
    #[serde(default)]
    pub clauses_used: Vec<Clause>,
}

impl StructuredAnswer {
    /// Canonical answer for a question the document does not cover
    pub fn not_found() -> Self {
        Self {
            decision: Decision::NotFound,
            amount: None,
            justification: "Information not found in the document".to_string(),
            clauses_used: Vec::new(),
        }
    }
}

/// Decision vocabulary the model must choose from.
///
/// Anything outside this set fails deserialization, which surfaces as a
/// model error for that question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "answered")]
    Answered,
    #[serde(rename = "not_found", alias = "not found")]
    NotFound,
    #[serde(rename = "insufficient information", alias = "insufficient_information")]
    InsufficientInformation,
}

/// A document excerpt supporting an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Exact sentence or clause from the document
    pub text: String,
    /// Page number or section label, when the model could attribute one
    #[serde(default)]
    pub page: Option<PageRef>,
}

/// Page reference: models emit either a number or a section label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Number(u32),
    Label(String),
}
