//! Image cleanup before recognition.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use super::OcrError;

/// Gray levels below this become black, the rest white.
pub const BINARIZE_THRESHOLD: u8 = 140;

/// Convert to 8-bit grayscale and apply a fixed threshold.
pub fn binarize(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let level = if luma(r, g, b) < BINARIZE_THRESHOLD { 0 } else { 255 };
        Luma([level])
    })
}

/// ITU-R 601-2 luma (L = R*299/1000 + G*587/1000 + B*114/1000) in 16-bit
/// fixed point, rounded.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
    l as u8
}

/// Encode a grayscale image as PNG.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| OcrError::Image(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Binarize a page image and encode it for submission.
pub fn preprocess(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    encode_png(&binarize(image))
}
