//! Resume text extraction. Total: every failure degrades to an empty string,
//! which the format scorer penalizes.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocKind {
    Pdf,
    Docx,
    Plain,
}

fn doc_kind(filename: &str) -> DocKind {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => DocKind::Pdf,
        Some("docx") => DocKind::Docx,
        _ => DocKind::Plain,
    }
}

/// Extracts plain text from an uploaded file, dispatching on its extension.
/// CPU-bound; call through `spawn_blocking` from async code.
pub fn extract_text(bytes: &[u8], filename: &str) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    let result = match doc_kind(filename) {
        DocKind::Pdf => pdf_text(bytes),
        DocKind::Docx => docx_text(bytes),
        DocKind::Plain => Ok(plain_text(bytes)),
    };
    result.unwrap_or_else(|e| {
        warn!("Text extraction failed for '{filename}': {e:#}");
        String::new()
    })
}

fn pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(result) => result.map_err(|e| anyhow!("PDF parse error: {e}")),
        Err(_) => Err(anyhow!("PDF parser panicked")),
    }
}

fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("Not a zip archive")?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .with_context(|| format!("Missing {DOCX_BODY}"))?
        .read_to_string(&mut xml)
        .context("Unreadable document body")?;
    document_xml_text(&xml)
}

/// Run text from a WordprocessingML body: one line per paragraph.
fn document_xml_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

fn plain_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\u{FFFD}', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCX_BODY, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Skills: </w:t></w:r><w:r><w:t>Rust &amp; Python</w:t></w:r></w:p>
    <w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let text = extract_text(&build_docx(BODY), "resume.DOCX");
        assert_eq!(text, "Jane Doe\nSkills: Rust & Python\nA\tB\nC\n");
    }

    #[test]
    fn test_docx_without_body_is_empty() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert_eq!(extract_text(&bytes, "resume.docx"), "");
    }

    #[test]
    fn test_corrupt_inputs_yield_empty_text() {
        assert_eq!(extract_text(b"%PDF-1.4 garbage", "resume.pdf"), "");
        assert_eq!(extract_text(b"not a zip", "resume.docx"), "");
    }

    #[test]
    fn test_plain_text_drops_invalid_utf8() {
        assert_eq!(extract_text(b"python\xff\xfe sql", "resume.txt"), "python sql");
        assert_eq!(extract_text("café".as_bytes(), "notes"), "café");
    }

    #[test]
    fn test_empty_upload_is_empty() {
        assert_eq!(extract_text(b"", "resume.pdf"), "");
    }

    #[test]
    fn test_doc_kind_dispatch() {
        assert_eq!(doc_kind("CV.Pdf"), DocKind::Pdf);
        assert_eq!(doc_kind("cv.docx"), DocKind::Docx);
        assert_eq!(doc_kind("cv.doc"), DocKind::Plain);
        assert_eq!(doc_kind("cv"), DocKind::Plain);
    }
}
