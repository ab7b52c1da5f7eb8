//! Integration tests for the per-page PDF pipeline.

use std::cell::RefCell;

use docmeta::error::{Error, Result};
use docmeta::extract::{ExtractOptions, OcrFallback, PageSelection, PdfBackend, PdfPipeline};
use docmeta::model::ExtractionMethod;
use docmeta::ocr::{OcrEngine, OcrError, PageRasterizer};
use image::{DynamicImage, GrayImage};

/// Backend serving fixed text layers.
struct MockPdf {
    pages: Vec<&'static str>,
}

impl PdfBackend for MockPdf {
    fn page_numbers(&self) -> Vec<u32> {
        (1..=self.pages.len() as u32).collect()
    }

    fn page_text(&self, page: u32) -> Result<String> {
        self.pages
            .get(page as usize - 1)
            .map(|s| s.to_string())
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))
    }
}

/// Rasterizer encoding the page number as the image width.
struct WidthRasterizer;

impl PageRasterizer for WidthRasterizer {
    fn render_page(&self, page: u32, _dpi: u32) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageLuma8(GrayImage::new(page, 1)))
    }
}

/// Rasterizer that cannot render anything.
struct BrokenRasterizer;

impl PageRasterizer for BrokenRasterizer {
    fn render_page(&self, page: u32, _dpi: u32) -> Result<DynamicImage> {
        Err(Error::Rasterize(format!("page {} has no media box", page)))
    }
}

/// OCR engine answering per page, recording every page it saw.
struct MockOcr {
    failing_page: Option<u32>,
    seen: RefCell<Vec<u32>>,
}

impl MockOcr {
    fn new(failing_page: Option<u32>) -> Self {
        Self {
            failing_page,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl OcrEngine for MockOcr {
    fn name(&self) -> &str {
        "mock"
    }

    fn recognize(&self, image: &DynamicImage) -> std::result::Result<String, OcrError> {
        let page = image.width();
        self.seen.borrow_mut().push(page);
        if Some(page) == self.failing_page {
            return Err(OcrError::Provider("quota exceeded".to_string()));
        }
        Ok(format!("ocr text of page {}", page))
    }
}

#[test]
fn test_ocr_failure_on_middle_page_keeps_neighbours() {
    let pdf = MockPdf {
        pages: vec!["", "", ""],
    };
    let ocr = MockOcr::new(Some(2));
    let options = ExtractOptions::default();
    let pipeline = PdfPipeline::new(
        &options,
        OcrFallback::Ready {
            ocr: &ocr,
            rasterizer: &WidthRasterizer,
        },
    );

    let outcome = pipeline.run(&pdf);

    assert_eq!(outcome.text, "ocr text of page 1ocr text of page 3");
    assert!(outcome
        .log
        .contains(&"Page 2: OCR failed - Vision API error: quota exceeded".to_string()));
    assert_eq!(outcome.pages[1].method, ExtractionMethod::Failed);
    assert!(outcome.pages[1].text.is_empty());
    assert_eq!(*ocr.seen.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_mixed_native_and_ocr_pages() {
    let pdf = MockPdf {
        pages: vec!["Native text on the first page. ", "  ", "And a native third page."],
    };
    let ocr = MockOcr::new(None);
    let options = ExtractOptions::default();
    let pipeline = PdfPipeline::new(
        &options,
        OcrFallback::Ready {
            ocr: &ocr,
            rasterizer: &WidthRasterizer,
        },
    );

    let outcome = pipeline.run(&pdf);

    assert_eq!(
        outcome.log,
        vec![
            "Page 1: Text extracted natively",
            "Page 2: No usable text layer, running OCR",
            "Page 2: OCR succeeded",
            "Page 3: Text extracted natively",
        ]
    );
    assert_eq!(
        outcome.text,
        "Native text on the first page. ocr text of page 2And a native third page."
    );
    assert_eq!(*ocr.seen.borrow(), vec![2]);
}

#[test]
fn test_exactly_ten_chars_goes_to_ocr() {
    let pdf = MockPdf {
        pages: vec!["  abcdefghij  ", "abcdefghijk"],
    };
    let ocr = MockOcr::new(None);
    let options = ExtractOptions::default();
    let pipeline = PdfPipeline::new(
        &options,
        OcrFallback::Ready {
            ocr: &ocr,
            rasterizer: &WidthRasterizer,
        },
    );

    let outcome = pipeline.run(&pdf);

    assert_eq!(outcome.pages[0].method, ExtractionMethod::Ocr);
    assert_eq!(outcome.pages[1].method, ExtractionMethod::Native);
    assert_eq!(*ocr.seen.borrow(), vec![1]);
}

#[test]
fn test_rasterizer_failure_is_logged() {
    let pdf = MockPdf { pages: vec![""] };
    let ocr = MockOcr::new(None);
    let options = ExtractOptions::default();
    let pipeline = PdfPipeline::new(
        &options,
        OcrFallback::Ready {
            ocr: &ocr,
            rasterizer: &BrokenRasterizer,
        },
    );

    let outcome = pipeline.run(&pdf);

    assert!(outcome.is_empty());
    assert_eq!(
        outcome.log.last().map(String::as_str),
        Some("Page 1: OCR failed - Rasterization error: page 1 has no media box")
    );
    assert!(ocr.seen.borrow().is_empty());
}

#[test]
fn test_unconfigured_ocr_fails_pages() {
    let pdf = MockPdf {
        pages: vec!["Plenty of native text here.", ""],
    };
    let options = ExtractOptions::default();
    let pipeline = PdfPipeline::new(
        &options,
        OcrFallback::Unavailable("OCR is not configured".to_string()),
    );

    let outcome = pipeline.run(&pdf);

    assert_eq!(outcome.text, "Plenty of native text here.");
    assert_eq!(
        outcome.log.last().map(String::as_str),
        Some("Page 2: OCR failed - OCR is not configured")
    );
}

#[test]
fn test_page_selection_skips_pages() {
    let pdf = MockPdf {
        pages: vec!["First page native text", "Second page native text", "Third page native text"],
    };
    let options = ExtractOptions::default().with_pages(PageSelection::parse("1,3").unwrap());
    let pipeline = PdfPipeline::new(&options, OcrFallback::Unavailable("off".to_string()));

    let outcome = pipeline.run(&pdf);

    assert_eq!(outcome.page_count(), 2);
    assert_eq!(outcome.text, "First page native textThird page native text");
    assert!(outcome.log.iter().all(|line| !line.starts_with("Page 2")));
}
