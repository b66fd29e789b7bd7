//! File loading with per-format text extraction
//!
//! Dispatches purely on the file extension: PDF pages, DOCX paragraphs,
//! blank-line blocks for plain text, and whole-file for emails.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{DocumentKind, LoadedDocument};

/// Load a document from disk into ordered text segments.
pub fn load(path: &Path) -> Result<LoadedDocument> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document")
        .to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let kind = DocumentKind::from_extension(&extension)
        .ok_or(Error::UnsupportedFormat(extension))?;

    let data = fs::read(path)?;

    let segments = match kind {
        DocumentKind::Pdf => load_pdf(&filename, &data)?,
        DocumentKind::Docx => load_docx(&filename, &data)?,
        DocumentKind::Txt => load_txt(&data),
        DocumentKind::Email => vec![String::from_utf8_lossy(&data).into_owned()],
    };

    Ok(LoadedDocument {
        filename,
        kind,
        segments,
    })
}

/// Extract PDF text, one segment per page.
fn load_pdf(filename: &str, data: &[u8]) -> Result<Vec<String>> {
    let pages = match pdf_extract::extract_text_from_mem_by_pages(data) {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!(
                "page-wise PDF extraction failed for '{}' ({}), falling back to whole-document extraction",
                filename,
                e
            );
            vec![pdf_extract::extract_text_from_mem(data)
                .map_err(|e| Error::file_parse(filename, e.to_string()))?]
        }
    };

    let pages: Vec<String> = pages
        .into_iter()
        .map(|page| page.replace('\0', "").trim().to_string())
        .filter(|page| !page.is_empty())
        .collect();

    if pages.is_empty() {
        return Err(Error::file_parse(
            filename,
            "no text content could be extracted from PDF",
        ));
    }

    Ok(pages)
}

/// Extract DOCX text, one segment per non-empty paragraph.
fn load_docx(filename: &str, data: &[u8]) -> Result<Vec<String>> {
    let doc = docx_rs::read_docx(data).map_err(|e| Error::file_parse(filename, e.to_string()))?;

    let mut segments = Vec::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            if !text.trim().is_empty() {
                segments.push(text);
            }
        }
    }

    Ok(segments)
}

/// Split plain text on blank-line boundaries.
fn load_txt(data: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(data)
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| block.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(content).expect("write temp file");
        file
    }

    #[test]
    fn txt_splits_on_blank_lines() {
        let file = temp_file(".txt", b"First block.\n\nSecond block.\n\n\n\nThird.");
        let doc = load(file.path()).unwrap();

        assert_eq!(doc.kind, DocumentKind::Txt);
        assert_eq!(doc.segments.len(), 3);
        assert_eq!(doc.segments[0], "First block.");
        assert!(doc.segments[2].contains("Third"));
    }

    #[test]
    fn email_is_a_single_segment() {
        let content = b"From: a@example.com\n\nSubject line\n\nBody paragraph.";
        let file = temp_file(".eml", content);
        let doc = load(file.path()).unwrap();

        assert_eq!(doc.kind, DocumentKind::Email);
        assert_eq!(doc.segments.len(), 1);
        assert_eq!(doc.segments[0].as_bytes(), content);
    }

    #[test]
    fn unsupported_extension_is_rejected_by_name() {
        let file = temp_file(".xyz", b"whatever");
        let err = load(file.path()).unwrap_err();

        match err {
            Error::UnsupportedFormat(ext) => assert_eq!(ext, "xyz"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn full_text_preserves_segment_boundaries() {
        let file = temp_file(".txt", b"Alpha.\n\nBeta.");
        let doc = load(file.path()).unwrap();
        assert_eq!(doc.full_text(), "Alpha.\n\nBeta.");
    }
}
