//! Optical character recognition for pages without a usable text layer.
//!
//! The extraction pipeline talks to two collaborators defined here:
//!
//! - a [`PageRasterizer`] that turns a PDF page into pixels, and
//! - an [`OcrEngine`] that turns pixels into text.
//!
//! Both are constructed once by the caller and passed in by reference.
//!
//! # Example
//!
//! ```no_run
//! use docmeta::ocr::{GoogleVisionOcr, OcrEngine, VisionConfig, VisionCredentials};
//!
//! let config = VisionConfig::new(VisionCredentials::ApiKey("key".into()));
//! let ocr = GoogleVisionOcr::new(config)?;
//! let page = image::open("scan.png").expect("readable image");
//! println!("{}", ocr.recognize(&page)?);
//! # Ok::<(), docmeta::ocr::OcrError>(())
//! ```

mod preprocess;
mod raster;
#[cfg(feature = "vision")]
mod vision;

pub use preprocess::{binarize, encode_png, preprocess, BINARIZE_THRESHOLD};
pub use raster::{PageRasterizer, PdfRenderer, OCR_DPI};
#[cfg(feature = "pdfium")]
pub use raster::PdfiumRenderer;
#[cfg(feature = "vision")]
pub use vision::{DetectionMode, GoogleVisionOcr, VisionConfig, VisionCredentials};

use image::DynamicImage;
use thiserror::Error;

/// Language hints sent with every request unless overridden.
pub const DEFAULT_LANGUAGE_HINTS: [&str; 2] = ["en", "hi"];

/// Errors raised while recognizing a page image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// The provider answered with an error status in the response body.
    #[error("Vision API error: {0}")]
    Provider(String),

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The page image could not be prepared.
    #[error("Image error: {0}")]
    Image(String),

    /// No engine or rasterizer is available.
    #[error("{0}")]
    Unavailable(String),
}

/// A text recognizer for page images.
pub trait OcrEngine {
    /// Short provider name, used in logs.
    fn name(&self) -> &str;

    /// Recognize the text in an image.
    ///
    /// Called once per page; failures are not retried.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}
