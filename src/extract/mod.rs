//! Text extraction dispatched by media type.
//!
//! # Example
//!
//! ```no_run
//! use docmeta::extract::TextExtractor;
//! use docmeta::model::{Document, MediaType};
//!
//! fn main() -> docmeta::Result<()> {
//!     let data = std::fs::read("notes.txt")?;
//!     let document = Document::new(data, MediaType::PlainText);
//!
//!     let outcome = TextExtractor::new().extract(&document)?;
//!     println!("{}", outcome.text);
//!     Ok(())
//! }
//! ```

mod backend;
mod docx;
mod options;
mod pdf;
mod text;

pub use backend::{LopdfBackend, PdfBackend};
pub use docx::extract_docx;
pub use options::{ExtractOptions, PageSelection, NATIVE_MIN_CHARS};
pub use pdf::{has_usable_text, OcrFallback, PdfPipeline};
pub use text::decode_text;

use crate::error::{Error, Result};
use crate::model::{Document, ExtractionOutcome, MediaType};
use crate::ocr::{OcrEngine, PdfRenderer};

/// Extracts text from documents, borrowing OCR collaborators from the caller.
pub struct TextExtractor<'a> {
    options: ExtractOptions,
    ocr: Option<&'a dyn OcrEngine>,
    renderer: Option<&'a dyn PdfRenderer>,
}

impl<'a> TextExtractor<'a> {
    /// Create an extractor without OCR support.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            ocr: None,
            renderer: None,
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Use an OCR engine for pages without usable text.
    pub fn with_ocr(mut self, ocr: &'a dyn OcrEngine) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Use a renderer to rasterize pages for OCR.
    pub fn with_renderer(mut self, renderer: &'a dyn PdfRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Current options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract text from a document.
    ///
    /// Unsupported media types fail with [`Error::UnsupportedFormat`]; invalid
    /// UTF-8 plain text fails with [`Error::Decode`]. Page-level PDF failures
    /// are recorded in the outcome log instead.
    pub fn extract(&self, document: &Document) -> Result<ExtractionOutcome> {
        match document.media_type() {
            MediaType::Pdf => self.extract_pdf(document.data()),
            MediaType::Docx => Ok(ExtractionOutcome::from_text(extract_docx(document.data())?)),
            MediaType::PlainText => Ok(ExtractionOutcome::from_text(decode_text(document.data())?)),
            MediaType::Other(mime) => Err(Error::UnsupportedFormat(mime.clone())),
        }
    }

    /// Run the page pipeline over a PDF payload.
    pub fn extract_pdf(&self, data: &[u8]) -> Result<ExtractionOutcome> {
        let backend = LopdfBackend::load_bytes(data)?;
        log::debug!(
            "Loaded PDF {} with {} pages",
            backend.version(),
            backend.page_count()
        );

        // Opened eagerly so the renderer borrows the payload for the whole run.
        let opened = match (self.options.ocr_enabled, self.ocr, self.renderer) {
            (false, _, _) => Err("OCR is disabled".to_string()),
            (true, Some(_), Some(renderer)) => renderer.open(data).map_err(|e| e.to_string()),
            (true, _, _) => Err("OCR is not configured".to_string()),
        };

        let fallback = match (&opened, self.ocr) {
            (Ok(rasterizer), Some(ocr)) => OcrFallback::Ready {
                ocr,
                rasterizer: rasterizer.as_ref(),
            },
            (Err(reason), _) => OcrFallback::Unavailable(reason.clone()),
            (Ok(_), None) => OcrFallback::Unavailable("OCR is not configured".to_string()),
        };

        Ok(PdfPipeline::new(&self.options, fallback).run(&backend))
    }
}

impl Default for TextExtractor<'_> {
    fn default() -> Self {
        Self::new()
    }
}
