//! Line source: the text lines of one bulletin document
//!
//! A document is either the PDF itself, read page by page with `pdfplumber`,
//! or text already extracted from it. Extracted text has its pages separated
//! by form feeds (as written by `pdftotext`), and files that are not valid
//! UTF-8 are decoded as Windows-1252.

use std::path::{Path, PathBuf};

use pdfplumber::{Pdf, TextOptions};
use thiserror::Error;

const PAGE_BREAK: char = '\u{000C}';

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract text from {}: {message}", .path.display())]
    Pdf { path: PathBuf, message: String },
}

impl SourceError {
    fn pdf(path: &Path, err: impl std::fmt::Display) -> Self {
        SourceError::Pdf {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Decode raw bytes, falling back to Windows-1252 for legacy extracts.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Split a document's text into physical lines, page after page.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK)
        .flat_map(str::lines)
        .map(str::to_string)
        .collect()
}

/// Read every line of an extracted-text document in reading order.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = split_lines(&decode(&bytes));
    tracing::debug!(path = %path.display(), lines = lines.len(), "read line source");
    Ok(lines)
}

/// Extract the text lines of a PDF, page after page.
pub fn read_pdf_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let pdf = Pdf::open_file(path, None).map_err(|e| SourceError::pdf(path, e))?;
    let options = TextOptions::default();

    let mut lines = Vec::new();
    for (idx, page) in pdf.pages_iter().enumerate() {
        let page = page.map_err(|e| SourceError::pdf(path, format!("page {}: {}", idx + 1, e)))?;
        lines.extend(split_lines(&page.extract_text(&options)));
    }
    tracing::debug!(
        path = %path.display(),
        pages = pdf.page_count(),
        lines = lines.len(),
        "read pdf line source"
    );
    Ok(lines)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Read a document's lines, choosing the reader by file extension: `.pdf`
/// files are extracted directly, anything else is taken as extracted text.
pub fn read_document_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    if is_pdf(path) {
        read_pdf_lines(path)
    } else {
        read_lines(path)
    }
}
