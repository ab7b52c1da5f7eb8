//! Document-level types.

use super::PageResult;
use serde::{Deserialize, Serialize};

/// MIME type of PDF uploads.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type of Word (OOXML) uploads.
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// MIME type of plain text uploads.
pub const MIME_TEXT: &str = "text/plain";

/// Declared media type of an input document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing document
    Docx,
    /// UTF-8 plain text
    PlainText,
    /// Anything else, kept verbatim
    Other(String),
}

impl MediaType {
    /// Map a MIME string to a media type.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            MIME_PDF => MediaType::Pdf,
            MIME_DOCX => MediaType::Docx,
            MIME_TEXT => MediaType::PlainText,
            _ => MediaType::Other(mime.trim().to_string()),
        }
    }

    /// Map a file extension (without the leading dot) to a media type.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => MediaType::Pdf,
            "docx" => MediaType::Docx,
            "txt" | "text" => MediaType::PlainText,
            other => MediaType::Other(other.to_string()),
        }
    }

    /// Canonical MIME string.
    pub fn mime(&self) -> &str {
        match self {
            MediaType::Pdf => MIME_PDF,
            MediaType::Docx => MIME_DOCX,
            MediaType::PlainText => MIME_TEXT,
            MediaType::Other(mime) => mime,
        }
    }

    /// Whether an extractor exists for this type.
    pub fn is_supported(&self) -> bool {
        !matches!(self, MediaType::Other(_))
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// An uploaded document: raw bytes plus the declared media type.
#[derive(Debug, Clone)]
pub struct Document {
    data: Vec<u8>,
    media_type: MediaType,
}

impl Document {
    /// Create a document from bytes and a declared media type.
    pub fn new(data: impl Into<Vec<u8>>, media_type: MediaType) -> Self {
        Self {
            data: data.into(),
            media_type,
        }
    }

    /// Create a document from bytes and a MIME string.
    pub fn with_mime(data: impl Into<Vec<u8>>, mime: &str) -> Self {
        Self::new(data, MediaType::from_mime(mime))
    }

    /// Raw document bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared media type.
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Text and diagnostics produced by extracting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Ordered concatenation of all page texts
    pub text: String,

    /// Ordered diagnostic messages
    pub log: Vec<String>,

    /// Per-page results (PDF only)
    pub pages: Vec<PageResult>,
}

impl ExtractionOutcome {
    /// Create an outcome from whole-document text with no page log.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            log: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Build an outcome from page results, concatenating their text in order.
    pub fn from_pages(pages: Vec<PageResult>, log: Vec<String>) -> Self {
        let text = pages.iter().map(|page| page.text.as_str()).collect();
        Self { text, log, pages }
    }

    /// True when no extractable text was found.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of pages processed.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
