//! doc-query: document question answering over PDF, DOCX, TXT and email files
//!
//! This crate extracts text from uploaded or fetched documents, selects the
//! passages relevant to each question (lexical word overlap or embedding
//! similarity), and asks a hosted chat model for a plain or structured answer.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, DocumentKind, LoadedDocument},
    query::QueryRequest,
    response::{Answer, AnswerSlot, QueryResponse, StructuredAnswer},
};
