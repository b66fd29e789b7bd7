//! Embedded form UI served from the root path

/// Single-page upload/URL form
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");
