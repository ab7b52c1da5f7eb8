//! Page-level types.

use serde::{Deserialize, Serialize};

/// How the text of a page was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Read from the embedded text layer
    Native,
    /// Recognized from a rendered image
    Ocr,
    /// Nothing could be extracted
    Failed,
}

impl ExtractionMethod {
    /// Lowercase name used in logs and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Native => "native",
            ExtractionMethod::Ocr => "ocr",
            ExtractionMethod::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of extracting a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted text (empty when the page failed)
    pub text: String,

    /// Method that produced the text
    pub method: ExtractionMethod,

    /// Diagnostic message for this page
    pub message: String,
}

impl PageResult {
    /// Create a new page result.
    pub fn new(
        number: u32,
        text: impl Into<String>,
        method: ExtractionMethod,
        message: impl Into<String>,
    ) -> Self {
        Self {
            number,
            text: text.into(),
            method,
            message: message.into(),
        }
    }

    /// Create a result for a page that contributed no text.
    pub fn failed(number: u32, message: impl Into<String>) -> Self {
        Self::new(number, String::new(), ExtractionMethod::Failed, message)
    }

    /// Check if the page contributed no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
