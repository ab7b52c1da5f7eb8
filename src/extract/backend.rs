//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for reading the embedded text layer,
//! isolating the concrete PDF library (lopdf) from the page pipeline.

use lopdf::Document as LopdfDocument;

use crate::detect::detect_pdf_format;
use crate::error::{Error, Result};

/// Abstract interface for native PDF text access.
pub trait PdfBackend {
    /// Page numbers (1-indexed) in document order.
    fn page_numbers(&self) -> Vec<u32>;

    /// Text of the embedded text layer of one page.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect_pdf_format(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text layer may be unreadable");
        }

        Ok(Self { doc })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

impl PdfBackend for LopdfBackend {
    fn page_numbers(&self) -> Vec<u32> {
        self.doc.get_pages().into_keys().collect()
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let total = self.page_count();
        if page == 0 || page > total {
            return Err(Error::PageOutOfRange(page, total));
        }

        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_non_pdf() {
        let result = LopdfBackend::load_bytes(b"not a pdf at all");
        assert!(matches!(result, Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_load_rejects_empty_payload() {
        assert!(LopdfBackend::load_bytes(&[]).is_err());
    }
}
