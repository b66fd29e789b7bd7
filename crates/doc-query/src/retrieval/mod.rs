//! Context selection over loaded documents
//!
//! Both strategies sit behind [`selector::ContextSource`]: a per-request
//! object built once per document and queried once per question.

pub mod index;
pub mod lexical;
pub mod selector;

pub use lexical::LexicalContext;
pub use selector::{build_context_source, ContextSource, EmbeddingContext};
