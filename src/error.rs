//! Error types for docmeta library.

use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::ocr::OcrError;

/// Result type alias for docmeta operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The declared media type has no extractor.
    ///
    /// The display text is the fixed message shown to users; the rejected
    /// media type is kept for diagnostics.
    #[error("Unsupported file format.")]
    UnsupportedFormat(String),

    /// Plain text input was not valid UTF-8.
    #[error("Decoding error: {0}")]
    Decode(#[from] FromUtf8Error),

    /// Error loading or walking the PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error reading the DOCX container or its markup.
    #[error("DOCX parsing error: {0}")]
    Docx(String),

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error rendering a page to pixels.
    #[error("Rasterization error: {0}")]
    Rasterize(String),

    /// Error preparing an image for recognition.
    #[error("Image processing error: {0}")]
    Image(String),

    /// Error reported by the OCR provider.
    #[error(transparent)]
    Ocr(#[from] OcrError),

    /// Error during report rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Docx(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Docx(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}
