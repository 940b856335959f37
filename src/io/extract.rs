//! Document text extraction.
//!
//! Turns an uploaded document into the plain text the pipeline analyzes:
//!
//! - `.txt`  -> UTF-8 decode
//! - `.pdf`  -> text of every page, concatenated
//! - `.docx` -> paragraph text from `word/document.xml`, one line per paragraph
//!
//! The extension decides the extractor. Files without a known extension are
//! sniffed by content.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::AppError;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Guess the kind from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        match infer::get(bytes).map(|t| t.mime_type()) {
            Some("application/pdf") => DocumentKind::Pdf,
            Some("application/zip") | Some(DOCX_MIME) => DocumentKind::Docx,
            _ => DocumentKind::Text,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DocumentKind::Text => "text",
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
        }
    }
}

/// Extracted document text.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub kind: DocumentKind,
    pub text: String,
}

/// Read and extract a document from disk.
pub fn extract_file(path: &Path) -> Result<ExtractedText, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::validation(format!("Failed to read document '{}': {e}", path.display())))?;
    let kind = DocumentKind::from_extension(path).unwrap_or_else(|| DocumentKind::sniff(&bytes));
    tracing::debug!(path = %path.display(), kind = kind.display_name(), bytes = bytes.len(), "extracting document");

    let text = extract_bytes(&bytes, kind)
        .map_err(|e| AppError::validation(format!("{} ('{}')", e.message(), path.display())))?;
    Ok(ExtractedText { kind, text })
}

pub fn extract_bytes(bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
    match kind {
        DocumentKind::Text => read_text(bytes),
        DocumentKind::Pdf => read_pdf(bytes),
        DocumentKind::Docx => read_docx(bytes),
    }
}

fn read_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| AppError::validation(format!("Text document is not valid UTF-8: {e}")))?;
    // Tolerate a UTF-8 byte-order mark.
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

fn read_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::validation(format!("Failed to extract PDF text: {e}")))
}

fn read_docx(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::validation(format!("Failed to open DOCX container: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::validation(format!("DOCX has no word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::validation(format!("Failed to read DOCX body: {e}")))?;
    docx_paragraphs(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Collect paragraph texts from a WordprocessingML body.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    paragraphs.push(std::mem::take(&mut current));
                    in_paragraph = false;
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_paragraph => current.push('\t'),
                b"w:br" | b"w:cr" if in_paragraph => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::validation(format!("Malformed DOCX text run: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::validation(format!(
                    "Malformed DOCX XML at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>I am </w:t></w:r><w:r><w:t>very happy</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Fish &amp; chips</w:t><w:tab/><w:t>today</w:t></w:r></w:p></w:body></w:document>"#;

    fn docx_bytes(body: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options = zip::write::FileOptions::default();
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn extension_mapping_is_not_swapped() {
        assert_eq!(DocumentKind::from_extension(&PathBuf::from("a.txt")), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_extension(&PathBuf::from("a.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension(&PathBuf::from("a.docx")), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension(&PathBuf::from("a.md")), None);
        assert_eq!(DocumentKind::from_extension(&PathBuf::from("README")), None);
    }

    #[test]
    fn sniff_recognizes_pdf_and_zip() {
        assert_eq!(DocumentKind::sniff(b"%PDF-1.7\n%..."), DocumentKind::Pdf);
        assert_eq!(DocumentKind::sniff(&docx_bytes(BODY)), DocumentKind::Docx);
        assert_eq!(DocumentKind::sniff(b"plain words"), DocumentKind::Text);
    }

    #[test]
    fn docx_yields_one_line_per_paragraph() {
        let text = extract_bytes(&docx_bytes(BODY), DocumentKind::Docx).unwrap();
        assert_eq!(text, "I am very happy\n\nFish & chips\ttoday");
    }

    #[test]
    fn text_strips_bom_and_rejects_invalid_utf8() {
        let text = extract_bytes("\u{feff}hello".as_bytes(), DocumentKind::Text).unwrap();
        assert_eq!(text, "hello");
        let err = extract_bytes(&[0xff, 0xfe, 0x00], DocumentKind::Text).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn extract_file_reads_txt_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "what a lovely day").unwrap();
        let out = extract_file(&path).unwrap();
        assert_eq!(out.kind, DocumentKind::Text);
        assert_eq!(out.text, "what a lovely day");
    }

    #[test]
    fn extract_file_sniffs_docx_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload");
        std::fs::write(&path, docx_bytes(BODY)).unwrap();
        let out = extract_file(&path).unwrap();
        assert_eq!(out.kind, DocumentKind::Docx);
        assert!(out.text.starts_with("I am very happy"));
    }

    #[test]
    fn missing_file_is_validation_error() {
        let err = extract_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }
}
