//! Extraction options and configuration.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::ocr::OCR_DPI;

/// Native text must be longer than this (trimmed, in characters) to be used.
pub const NATIVE_MIN_CHARS: usize = 10;

/// Options for extracting text from documents.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Trimmed native text must exceed this many characters to be accepted
    pub native_min_chars: usize,

    /// Resolution for rendering pages sent to OCR
    pub ocr_dpi: u32,

    /// Whether pages without usable text are sent to OCR
    pub ocr_enabled: bool,

    /// Which PDF pages to process
    pub pages: PageSelection,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the native text acceptance threshold.
    pub fn with_native_min_chars(mut self, chars: usize) -> Self {
        self.native_min_chars = chars;
        self
    }

    /// Set the OCR rendering resolution.
    pub fn with_ocr_dpi(mut self, dpi: u32) -> Self {
        self.ocr_dpi = dpi;
        self
    }

    /// Enable or disable the OCR fallback.
    pub fn with_ocr(mut self, enabled: bool) -> Self {
        self.ocr_enabled = enabled;
        self
    }

    /// Disable the OCR fallback.
    pub fn native_only(mut self) -> Self {
        self.ocr_enabled = false;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            native_min_chars: NATIVE_MIN_CHARS,
            ocr_dpi: OCR_DPI,
            ocr_enabled: true,
            pages: PageSelection::All,
        }
    }
}

/// Page selection for PDF extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Process all pages
    #[default]
    All,
    /// Process a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Process specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_page(start)?;
                let end = parse_page(end)?;
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = BTreeSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = (parse_page(start)?, parse_page(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(part.to_string()));
                }
                pages.extend(start..=end);
            } else {
                pages.insert(parse_page(part)?);
            }
        }

        Ok(PageSelection::Pages(pages.into_iter().collect()))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(s.trim().to_string())),
        Ok(p) => Ok(p),
    }
}
