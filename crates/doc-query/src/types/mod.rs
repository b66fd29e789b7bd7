//! Core data types

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, DocumentKind, LoadedDocument};
