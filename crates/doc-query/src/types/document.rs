//! Document and chunk types

use serde::{Deserialize, Serialize};

/// Supported document formats, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// Email file (.eml / .email)
    Email,
}

impl DocumentKind {
    /// Detect the document kind from a lowercase file extension.
    ///
    /// Returns `None` for anything not in the supported set; callers turn
    /// that into an unsupported-format error naming the extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "eml" | "email" => Some(Self::Email),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Txt => "Text File",
            Self::Email => "Email",
        }
    }
}

/// A document whose text has been extracted, one segment per page,
/// paragraph or block depending on the format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedDocument {
    /// User-facing filename (upload name or last URL path component)
    pub filename: String,
    /// Detected format
    pub kind: DocumentKind,
    /// Ordered raw text segments
    pub segments: Vec<String>,
}

impl LoadedDocument {
    /// Concatenate all segments into one text, with blank lines between
    /// segments so segment boundaries survive as paragraph boundaries.
    pub fn full_text(&self) -> String {
        self.segments.join("\n\n")
    }
}

/// A bounded window of document text, the unit of embedding retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub content: String,
    /// Source document filename
    pub source: String,
    /// Position of this chunk within its document
    pub index: u32,
}
