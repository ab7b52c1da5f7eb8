//! DOCX text extraction.

use std::io::{Cursor, Read, Seek};

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use zip::ZipArchive;

use crate::error::Result;

/// Main part of a word processing package.
const MAIN_PART: &str = "word/document.xml";

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/header[0-9]*\.xml$").unwrap());
static FOOTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/footer[0-9]*\.xml$").unwrap());

/// Extract the plain text of a DOCX payload.
///
/// Header parts come first, then the main document, then footer parts,
/// each in archive order. Every paragraph opens with a blank line, `w:tab`
/// becomes a tab and `w:br`/`w:cr` become newlines. The result is trimmed.
pub fn extract_docx(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let headers = names.iter().filter(|n| HEADER_RE.is_match(n));
    let footers = names.iter().filter(|n| FOOTER_RE.is_match(n));

    let mut text = String::new();
    for name in headers {
        text.push_str(&part_text(&mut archive, name)?);
    }
    text.push_str(&part_text(&mut archive, MAIN_PART)?);
    for name in footers {
        text.push_str(&part_text(&mut archive, name)?);
    }

    Ok(text.trim().to_string())
}

fn part_text<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut xml = String::new();
    archive.by_name(name)?.read_to_string(&mut xml)?;
    document_xml_to_text(&xml)
}

/// Flatten WordprocessingML markup to text.
fn document_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text = false;
    // Tab stops inside paragraph properties are layout, not content.
    let mut in_tab_stops = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => text.push_str("\n\n"),
                b"t" => in_text = true,
                b"tabs" => in_tab_stops = true,
                b"tab" if !in_tab_stops => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => text.push_str("\n\n"),
                b"tab" if !in_tab_stops => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => text.push_str(&e.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"tabs" => in_tab_stops = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn docx(body: &str) -> Vec<u8> {
        let xml = format!(r#"<?xml version="1.0"?><w:document {}><w:body>{}</w:body></w:document>"#, NS, body);
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file(MAIN_PART, zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_are_separated() {
        let data = docx(
            "<w:p><w:r><w:t>QUARTERLY REPORT</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Revenue grew.</w:t></w:r></w:p>",
        );
        assert_eq!(extract_docx(&data).unwrap(), "QUARTERLY REPORT\n\nRevenue grew.");
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let data = docx(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
               <w:r><w:t xml:space="preserve">Name:</w:t><w:tab/><w:t>Ada</w:t></w:r>
               <w:r><w:br/><w:t>Line two &amp; more</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx(&data).unwrap(), "Name:\tAda\nLine two & more");
    }

    #[test]
    fn test_headers_before_body_and_footers_after() {
        let part = |root: &str, text: &str| {
            format!(
                r#"<?xml version="1.0"?><w:{root} {ns}><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:{root}>"#,
                root = root,
                ns = NS,
                text = text
            )
        };
        let document = format!(
            r#"<?xml version="1.0"?><w:document {}><w:body><w:p><w:r><w:t>body text line</w:t></w:r></w:p></w:body></w:document>"#,
            NS
        );

        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file("word/footer1.xml", options).unwrap();
            zip.write_all(part("ftr", "Page footer").as_bytes()).unwrap();
            zip.start_file(MAIN_PART, options).unwrap();
            zip.write_all(document.as_bytes()).unwrap();
            zip.start_file("word/header1.xml", options).unwrap();
            zip.write_all(part("hdr", "ACME CONFIDENTIAL").as_bytes()).unwrap();
            zip.start_file("word/headerstyles.xml", options).unwrap();
            zip.write_all(part("hdr", "not a header part").as_bytes()).unwrap();
            zip.finish().unwrap();
        }

        assert_eq!(
            extract_docx(&buf.into_inner()).unwrap(),
            "ACME CONFIDENTIAL\n\nbody text line\n\nPage footer"
        );
    }

    #[test]
    fn test_missing_main_part_is_error() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.finish().unwrap();
        }
        let result = extract_docx(&buf.into_inner());
        assert!(matches!(result, Err(Error::Docx(_))));
    }

    #[test]
    fn test_not_a_zip_is_error() {
        assert!(extract_docx(b"plain bytes").is_err());
    }
}
