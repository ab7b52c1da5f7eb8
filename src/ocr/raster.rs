//! PDF page rasterization.

use image::DynamicImage;

use crate::error::Result;

/// Resolution used when rendering pages for OCR.
pub const OCR_DPI: u32 = 300;

/// Renders pages of one opened PDF.
pub trait PageRasterizer {
    /// Render a page (1-indexed) at the given resolution.
    fn render_page(&self, page: u32, dpi: u32) -> Result<DynamicImage>;
}

/// Opens PDF payloads for rasterization.
///
/// Implementations hold the long-lived library handle; each call to
/// [`PdfRenderer::open`] borrows it for one document.
pub trait PdfRenderer {
    /// Open a PDF payload for rendering.
    fn open<'a>(&'a self, data: &'a [u8]) -> Result<Box<dyn PageRasterizer + 'a>>;
}

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRenderer;

#[cfg(feature = "pdfium")]
mod pdfium {
    use std::path::Path;

    use image::DynamicImage;
    use pdfium_render::prelude::*;

    use super::{PageRasterizer, PdfRenderer};
    use crate::error::{Error, Result};

    /// PDF points per inch.
    const POINTS_PER_INCH: f32 = 72.0;

    /// [`PdfRenderer`] backed by a bound pdfium library.
    pub struct PdfiumRenderer {
        pdfium: Pdfium,
    }

    impl PdfiumRenderer {
        /// Bind to pdfium, trying `lib_dir` first and the system library second.
        pub fn bind(lib_dir: Option<&Path>) -> Result<Self> {
            if let Some(dir) = lib_dir {
                let dir = dir.to_string_lossy().to_string();
                match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir)) {
                    Ok(bindings) => {
                        log::debug!("Bound pdfium from {}", dir);
                        return Ok(Self {
                            pdfium: Pdfium::new(bindings),
                        });
                    }
                    Err(e) => log::warn!("Failed to bind pdfium in {}: {:?}", dir, e),
                }
            }

            let bindings = Pdfium::bind_to_system_library()
                .map_err(|e| Error::Rasterize(format!("pdfium unavailable: {:?}", e)))?;
            Ok(Self {
                pdfium: Pdfium::new(bindings),
            })
        }
    }

    impl PdfRenderer for PdfiumRenderer {
        fn open<'a>(&'a self, data: &'a [u8]) -> Result<Box<dyn PageRasterizer + 'a>> {
            let document = self
                .pdfium
                .load_pdf_from_byte_slice(data, None)
                .map_err(|e| Error::Rasterize(format!("Failed to load PDF: {:?}", e)))?;
            Ok(Box::new(PdfiumPages { document }))
        }
    }

    struct PdfiumPages<'a> {
        document: PdfDocument<'a>,
    }

    impl PageRasterizer for PdfiumPages<'_> {
        fn render_page(&self, page: u32, dpi: u32) -> Result<DynamicImage> {
            let pages = self.document.pages();
            let total = pages.len() as u32;
            let index = page
                .checked_sub(1)
                .and_then(|i| u16::try_from(i).ok())
                .filter(|i| u32::from(*i) < total)
                .ok_or(Error::PageOutOfRange(page, total))?;

            let pdf_page = pages
                .get(index)
                .map_err(|e| Error::Rasterize(format!("Page {}: {:?}", page, e)))?;

            let config =
                PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);
            let bitmap = pdf_page
                .render_with_config(&config)
                .map_err(|e| Error::Rasterize(format!("Page {}: {:?}", page, e)))?;

            Ok(bitmap.as_image())
        }
    }
}
