//! Request orchestration
//!
//! Resolves a document from a URL or an upload, stages it in a transient
//! file, and runs loader -> selector -> synthesizer once per question in the
//! supplied order. Document-level failures abort the whole batch;
//! question-level failures degrade into their answer slot.

use std::path::Path;

use crate::error::{Error, Result};
use crate::ingestion::loader;
use crate::retrieval::build_context_source;
use crate::server::state::AppState;
use crate::types::response::AnswerSlot;

/// Where the document bytes come from
pub enum DocumentSource {
    /// Fetch by HTTP GET
    Url(String),
    /// Already-uploaded bytes
    Upload { filename: String, data: Vec<u8> },
}

/// Answer every question against one document.
///
/// Returns exactly one slot per question, index-aligned with the input.
pub async fn answer_questions(
    state: &AppState,
    source: DocumentSource,
    questions: &[String],
) -> Result<Vec<AnswerSlot>> {
    let (filename, data) = match source {
        DocumentSource::Url(url) => fetch_document(state, &url).await?,
        DocumentSource::Upload { filename, data } => (filename, data),
    };

    // The staged file lives for the scope of this request only; dropping the
    // handle removes it on success and failure paths alike.
    let extension = extension_of(&filename);
    let staged = tempfile::Builder::new()
        .prefix("doc-query-")
        .suffix(&format!(".{extension}"))
        .tempfile()?;
    std::fs::write(staged.path(), &data)?;

    let mut doc = loader::load(staged.path())?;
    doc.filename = filename;
    tracing::info!(
        filename = %doc.filename,
        kind = ?doc.kind,
        segments = doc.segments.len(),
        "document loaded"
    );

    let source = build_context_source(&doc, state.config(), state.embedder()).await?;

    let mut answers = Vec::with_capacity(questions.len());
    for question in questions {
        let slot = match source.context_for(question).await {
            Ok(context) => state.synthesizer().synthesize(question, &context).await,
            // Selector failures are question-scoped, same as model failures.
            Err(e) => {
                tracing::warn!("context selection failed: {e}");
                AnswerSlot::error(e.to_string())
            }
        };
        answers.push(slot);
    }

    Ok(answers)
}

/// Fetch a document by URL, failing on any non-2xx status.
async fn fetch_document(state: &AppState, url: &str) -> Result<(String, Vec<u8>)> {
    let response = state
        .fetch_client()
        .get(url)
        .send()
        .await
        .map_err(|e| Error::fetch(url, e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::fetch(url, format!("HTTP {}", response.status())));
    }

    let data = response
        .bytes()
        .await
        .map_err(|e| Error::fetch(url, e.to_string()))?;

    Ok((filename_from_url(url), data.to_vec()))
}

/// Last path component of the URL, when it looks like a filename.
/// URLs without one are assumed to serve a PDF.
fn filename_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);

    after_scheme
        .split_once('/')
        .and_then(|(_, path)| path.rsplit('/').next())
        .filter(|name| name.contains('.'))
        .map(|name| name.to_string())
        .unwrap_or_else(|| "document.pdf".to_string())
}

fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "pdf".to_string())
}
