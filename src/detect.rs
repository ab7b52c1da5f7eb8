//! Media type detection and PDF header validation.

use crate::error::{Error, Result};
use crate::model::MediaType;
use std::io::Cursor;
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Local file header of a zip container.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Main part of a word processing package.
const DOCX_MAIN_PART: &str = "word/document.xml";

/// Validate a PDF header and read its version.
///
/// # Returns
/// * `Ok(PdfFormat)` if the data starts with a valid PDF header
/// * `Err(Error::PdfParse)` if the data is not a PDF
pub fn detect_pdf_format(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::PdfParse("missing %PDF- header".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::PdfParse(format!("unsupported version {}", version)));
    }

    Ok(PdfFormat { version })
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Guess the media type from leading bytes.
///
/// Recognizes PDF headers and zip containers holding a Word main part.
/// Returns `None` for anything else, including plain text.
pub fn sniff_media_type(data: &[u8]) -> Option<MediaType> {
    if data.starts_with(PDF_MAGIC) {
        return Some(MediaType::Pdf);
    }

    if data.starts_with(ZIP_MAGIC) && is_docx_bytes(data) {
        return Some(MediaType::Docx);
    }

    None
}

/// Check if a zip payload contains a Word main document part.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    zip::ZipArchive::new(Cursor::new(data))
        .map(|archive| archive.file_names().any(|name| name == DOCX_MAIN_PART))
        .unwrap_or(false)
}

/// Determine the media type of a file from its extension, falling back
/// to content sniffing when the extension is missing or unknown.
pub fn detect_media_type<P: AsRef<Path>>(path: P, data: &[u8]) -> MediaType {
    let from_ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(MediaType::from_extension);

    match from_ext {
        Some(media_type) if media_type.is_supported() => media_type,
        other => sniff_media_type(data)
            .or(other)
            .unwrap_or_else(|| MediaType::Other("application/octet-stream".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file(DOCX_MAIN_PART, options).unwrap();
            zip.write_all(b"<w:document/>").unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_pdf_format(data).unwrap();
        assert_eq!(format.version, "1.7");
    }

    #[test]
    fn test_detect_invalid_pdf() {
        assert!(detect_pdf_format(b"<!DOCTYPE html>").is_err());
        assert!(detect_pdf_format(b"%PDF").is_err());
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_sniff_media_type() {
        assert_eq!(sniff_media_type(b"%PDF-1.4\n"), Some(MediaType::Pdf));
        assert_eq!(sniff_media_type(&docx_bytes()), Some(MediaType::Docx));
        assert_eq!(sniff_media_type(b"hello"), None);
        assert_eq!(sniff_media_type(b"PK\x03\x04garbage"), None);
    }

    #[test]
    fn test_detect_media_type_prefers_extension() {
        assert_eq!(
            detect_media_type("notes.txt", b"%PDF-1.4"),
            MediaType::PlainText
        );
        assert_eq!(detect_media_type("scan", b"%PDF-1.4\n"), MediaType::Pdf);
        assert_eq!(
            detect_media_type("photo.png", b"\x89PNG"),
            MediaType::Other("png".to_string())
        );
    }
}
