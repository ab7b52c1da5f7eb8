//! # docmeta
//!
//! Document text extraction and metadata summarization for Rust.
//!
//! This library extracts text from PDF, DOCX and plain text documents,
//! falls back to OCR for PDF pages without a usable text layer, and derives
//! lightweight metadata: language, counts, a guessed title, key sentences,
//! named entities and a readable summary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docmeta::{render, Analysis, DocMeta};
//!
//! fn main() -> docmeta::Result<()> {
//!     match DocMeta::new().analyze_file("notes.txt")? {
//!         Analysis::Complete(report) => {
//!             println!("{}", render::to_json(&report, render::JsonFormat::Pretty)?);
//!         }
//!         Analysis::Empty(outcome) => {
//!             eprintln!("No text could be extracted: {:?}", outcome.log);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Per-page PDF pipeline**: native text layer first, OCR for the rest
//! - **Pluggable providers**: OCR engine, page rasterizer, language detector
//!   and entity recognizer are traits passed in by reference
//! - **`pdfium`** (default): page rasterization through pdfium
//! - **`vision`** (default): OCR through the Google Cloud Vision REST API

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod ocr;
pub mod render;
pub mod summarize;

// Re-export commonly used types
pub use detect::{detect_media_type, detect_pdf_format, sniff_media_type, PdfFormat};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, PageSelection, TextExtractor};
pub use model::{
    Document, EntityLabel, ExtractionMethod, ExtractionOutcome, MediaType, Metadata,
    NamedEntity, PageResult, Report,
};
pub use ocr::{OcrEngine, OcrError, PageRasterizer, PdfRenderer};
pub use render::JsonFormat;
pub use summarize::{
    EntityRecognizer, LanguageDetector, LanguageError, RuleBasedRecognizer, Summarizer,
    SummaryOptions, WhatlangDetector,
};

use std::path::Path;

static WHATLANG: WhatlangDetector = WhatlangDetector::new();
static RULES: RuleBasedRecognizer = RuleBasedRecognizer;

/// Read a file and determine its media type from the extension or contents.
///
/// # Example
///
/// ```no_run
/// use docmeta::{load_document, MediaType};
///
/// let document = load_document("report.pdf").unwrap();
/// assert_eq!(document.media_type(), &MediaType::Pdf);
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let media_type = detect_media_type(path, &data);
    Ok(Document::new(data, media_type))
}

/// Extract text from a file without OCR.
///
/// # Example
///
/// ```no_run
/// use docmeta::extract_file;
///
/// let outcome = extract_file("notes.docx").unwrap();
/// println!("{}", outcome.text);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionOutcome> {
    let document = load_document(path)?;
    TextExtractor::new().extract(&document)
}

/// Summarize text with the bundled language detector and entity recognizer.
///
/// # Example
///
/// ```
/// let report = docmeta::summarize_text("HELLO WORLD\nsome body text.");
/// assert_eq!(report.title, "HELLO WORLD");
///
/// // Twenty characters or fewer are too short for language detection.
/// let note = docmeta::summarize_text("Twenty chars exactly");
/// assert_eq!(note.metadata.language, "Unknown");
/// ```
pub fn summarize_text(text: &str) -> Report {
    Summarizer::new(&WHATLANG, &RULES).summarize(text, Vec::new())
}

/// Analyze in-memory bytes of a known media type without OCR.
pub fn analyze_bytes(data: &[u8], media_type: MediaType) -> Result<Analysis> {
    DocMeta::new().analyze(&Document::new(data, media_type))
}

/// Result of analyzing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Text was extracted and summarized.
    Complete(Report),
    /// Extraction produced no text; the outcome carries the page log.
    Empty(ExtractionOutcome),
}

impl Analysis {
    /// The report, if any text was extracted.
    pub fn report(&self) -> Option<&Report> {
        match self {
            Analysis::Complete(report) => Some(report),
            Analysis::Empty(_) => None,
        }
    }

    /// Whether extraction produced no text.
    pub fn is_empty(&self) -> bool {
        matches!(self, Analysis::Empty(_))
    }

    /// Extraction log.
    pub fn log(&self) -> &[String] {
        match self {
            Analysis::Complete(report) => &report.debug_log,
            Analysis::Empty(outcome) => &outcome.log,
        }
    }
}

/// Builder wiring extraction and summarization together.
///
/// Providers are borrowed; construct them once and reuse the builder for
/// many documents.
///
/// # Example
///
/// ```no_run
/// use docmeta::{DocMeta, PageSelection};
/// use docmeta::ocr::{GoogleVisionOcr, PdfiumRenderer, VisionConfig, VisionCredentials};
///
/// let ocr = GoogleVisionOcr::new(VisionConfig::new(VisionCredentials::ApiKey("key".into())))?;
/// let renderer = PdfiumRenderer::bind(None)?;
///
/// let analysis = DocMeta::new()
///     .with_ocr(&ocr)
///     .with_renderer(&renderer)
///     .with_pages(PageSelection::parse("1-3")?)
///     .with_sentence_count(3)
///     .analyze_file("scan.pdf")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DocMeta<'a> {
    extract_options: ExtractOptions,
    summary_options: SummaryOptions,
    ocr: Option<&'a dyn OcrEngine>,
    renderer: Option<&'a dyn PdfRenderer>,
    detector: &'a dyn LanguageDetector,
    recognizer: &'a dyn EntityRecognizer,
}

impl<'a> DocMeta<'a> {
    /// Create a builder with the bundled detector and recognizer, without OCR.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            summary_options: SummaryOptions::default(),
            ocr: None,
            renderer: None,
            detector: &WHATLANG,
            recognizer: &RULES,
        }
    }

    /// Use an OCR engine for pages without usable text.
    pub fn with_ocr(mut self, ocr: &'a dyn OcrEngine) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Use a renderer to rasterize PDF pages for OCR.
    pub fn with_renderer(mut self, renderer: &'a dyn PdfRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Use a different language detector.
    pub fn with_language_detector(mut self, detector: &'a dyn LanguageDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Use a different entity recognizer.
    pub fn with_entity_recognizer(mut self, recognizer: &'a dyn EntityRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set summarizer options.
    pub fn with_summary_options(mut self, options: SummaryOptions) -> Self {
        self.summary_options = options;
        self
    }

    /// Restrict PDF processing to the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Set the number of key sentences.
    pub fn with_sentence_count(mut self, count: usize) -> Self {
        self.summary_options = self.summary_options.with_sentence_count(count);
        self
    }

    /// Skip OCR even when an engine is configured.
    pub fn native_only(mut self) -> Self {
        self.extract_options = self.extract_options.native_only();
        self
    }

    fn extractor(&self) -> TextExtractor<'a> {
        let mut extractor = TextExtractor::new().with_options(self.extract_options.clone());
        if let Some(ocr) = self.ocr {
            extractor = extractor.with_ocr(ocr);
        }
        if let Some(renderer) = self.renderer {
            extractor = extractor.with_renderer(renderer);
        }
        extractor
    }

    fn summarizer(&self) -> Summarizer<'a> {
        Summarizer::new(self.detector, self.recognizer).with_options(self.summary_options)
    }

    /// Extract text only.
    pub fn extract(&self, document: &Document) -> Result<ExtractionOutcome> {
        self.extractor().extract(document)
    }

    /// Summarize already extracted text.
    pub fn summarize(&self, text: &str, debug_log: Vec<String>) -> Report {
        self.summarizer().summarize(text, debug_log)
    }

    /// Extract and summarize a document.
    ///
    /// Returns [`Analysis::Empty`] when no text could be extracted.
    pub fn analyze(&self, document: &Document) -> Result<Analysis> {
        let outcome = self.extract(document)?;
        if outcome.is_empty() {
            log::warn!("No text extracted from {} document", document.media_type());
            return Ok(Analysis::Empty(outcome));
        }

        let ExtractionOutcome { text, log, .. } = outcome;
        Ok(Analysis::Complete(self.summarize(&text, log)))
    }

    /// Read, extract and summarize a file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let document = load_document(path)?;
        self.analyze(&document)
    }
}

impl Default for DocMeta<'_> {
    fn default() -> Self {
        Self::new()
    }
}
