//! Error types for the document query service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
///
/// Document-level errors (fetch, unsupported format, parse) abort the whole
/// request; question-level model errors are caught upstream and degrade into
/// the corresponding answer slot instead of reaching this type's
/// `IntoResponse`.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognized file extension
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Non-2xx status or transport failure retrieving a document by URL
    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    /// Malformed document content
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Embedding generation failed
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Hosted model call failed or returned an invalid payload
    #[error("Model error: {0}")]
    Model(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-readable label for the error body
    fn label(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Fetch { .. } => "fetch_error",
            Error::FileParse { .. } => "parse_error",
            Error::Embedding(_) => "embedding_error",
            Error::Model(_) => "model_error",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Every uncaught failure surfaces as a 500 with the message exposed.
        // Acceptable for an internal tool; a public deployment would want to
        // redact `detail`.
        let body = Json(json!({
            "error": self.label(),
            "detail": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_the_extension() {
        let err = Error::UnsupportedFormat("xyz".to_string());
        assert!(err.to_string().contains("xyz"));
        assert_eq!(err.label(), "unsupported_format");
    }

    #[test]
    fn fetch_error_carries_url_and_message() {
        let err = Error::fetch("http://example.com/doc.pdf", "HTTP 404");
        let text = err.to_string();
        assert!(text.contains("http://example.com/doc.pdf"));
        assert!(text.contains("HTTP 404"));
    }
}
