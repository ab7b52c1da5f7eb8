//! Per-page PDF extraction with OCR fallback.
//!
//! Each page is read from its text layer first. Pages whose trimmed text is
//! not longer than [`ExtractOptions::native_min_chars`] are rendered and sent
//! to OCR. A failing page is logged and skipped; it never aborts the
//! document.

use crate::error::{Error, Result};
use crate::model::{ExtractionMethod, ExtractionOutcome, PageResult};
use crate::ocr::{OcrEngine, OcrError, PageRasterizer};

use super::backend::PdfBackend;
use super::options::ExtractOptions;

/// What the pipeline does with pages lacking a usable text layer.
pub enum OcrFallback<'a> {
    /// Render the page and recognize it.
    Ready {
        /// Recognizer for rendered pages
        ocr: &'a dyn OcrEngine,
        /// Renderer for the current document
        rasterizer: &'a dyn PageRasterizer,
    },
    /// Fail the page with this reason.
    Unavailable(String),
}

/// Runs the text-or-OCR decision over the pages of one document.
pub struct PdfPipeline<'a> {
    options: &'a ExtractOptions,
    fallback: OcrFallback<'a>,
}

impl<'a> PdfPipeline<'a> {
    /// Create a pipeline.
    pub fn new(options: &'a ExtractOptions, fallback: OcrFallback<'a>) -> Self {
        Self { options, fallback }
    }

    /// Process every selected page in document order.
    pub fn run(&self, backend: &dyn PdfBackend) -> ExtractionOutcome {
        let mut pages = Vec::new();
        let mut log = Vec::new();

        for number in backend.page_numbers() {
            if !self.options.pages.includes(number) {
                continue;
            }
            pages.push(self.process_page(backend, number, &mut log));
        }

        ExtractionOutcome::from_pages(pages, log)
    }

    fn process_page(&self, backend: &dyn PdfBackend, number: u32, log: &mut Vec<String>) -> PageResult {
        let native = match backend.page_text(number) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to read text layer of page {}: {}", number, e);
                String::new()
            }
        };

        if has_usable_text(&native, self.options.native_min_chars) {
            let message = format!("Page {}: Text extracted natively", number);
            log::debug!("{}", message);
            log.push(message.clone());
            return PageResult::new(number, native, ExtractionMethod::Native, message);
        }

        let message = format!("Page {}: No usable text layer, running OCR", number);
        log::debug!("{}", message);
        log.push(message);

        match self.recognize(number) {
            Ok(text) => {
                let message = format!("Page {}: OCR succeeded", number);
                log::debug!("{}", message);
                log.push(message.clone());
                PageResult::new(number, text, ExtractionMethod::Ocr, message)
            }
            Err(e) => {
                let message = format!("Page {}: OCR failed - {}", number, e);
                log::warn!("{}", message);
                log.push(message.clone());
                PageResult::failed(number, message)
            }
        }
    }

    fn recognize(&self, number: u32) -> Result<String> {
        match &self.fallback {
            OcrFallback::Ready { ocr, rasterizer } => {
                let image = rasterizer.render_page(number, self.options.ocr_dpi)?;
                log::debug!("Page {}: recognizing with {}", number, ocr.name());
                Ok(ocr.recognize(&image)?)
            }
            OcrFallback::Unavailable(reason) => {
                Err(Error::Ocr(OcrError::Unavailable(reason.clone())))
            }
        }
    }
}

/// Whether native text is long enough to skip OCR.
///
/// The trimmed length must be strictly greater than `min_chars`.
pub fn has_usable_text(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() > min_chars
}
