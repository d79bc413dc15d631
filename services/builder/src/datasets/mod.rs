//! Dataset builders: combine parsed series into the published JSON payloads
//!
//! Each builder is split in two: `build` is pure arithmetic over already
//! parsed series, `load` reads the configured documents and calls `build`.

pub mod banking;
pub mod exports;
pub mod gdp;
pub mod tourism;

use anyhow::{Context, Result};
use parser::{parse, read_document_lines, Series};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Looked up in this order; the bulletin PDFs are published with `.PDF`.
const DOCUMENT_EXTENSIONS: &[&str] = &["PDF", "pdf", "txt"];

/// Published dataset envelope
#[derive(Debug, Clone, Serialize)]
pub struct Dataset<R, N> {
    pub title: String,
    pub description: String,
    pub source: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub data: Vec<R>,
    pub national: N,
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean rounded to 2 decimal places, 0 when there is nothing to average.
pub fn mean2(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

/// Descending order on an optional key, missing keys ranked as zero.
pub fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}

/// First existing `<dir>/<stem>.<ext>`, or the extracted-text path when
/// there is none (so the read error names a file the user can create).
pub fn document_path(dir: &Path, stem: &str) -> PathBuf {
    DOCUMENT_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(format!("{}.txt", stem)))
}

/// Parse the document `<stem>` from `text_dir`, the PDF when present.
pub fn load_series(text_dir: &Path, stem: &str) -> Result<Series> {
    let path = document_path(text_dir, stem);
    let lines = read_document_lines(&path).context("Failed to load document text")?;
    let series = parse(&lines);
    if series.is_empty() {
        tracing::warn!(document = stem, "no state rows parsed");
    } else {
        tracing::info!(
            document = stem,
            periods = series.periods.len(),
            states = series.len(),
            "parsed document"
        );
    }
    Ok(series)
}

/// Like [`load_series`], but the dataset cannot be built without this table.
pub fn load_primary_series(text_dir: &Path, stem: &str) -> Result<Series> {
    let series = load_series(text_dir, stem)?;
    if series.is_empty() {
        anyhow::bail!("No state rows parsed from primary document {}", stem);
    }
    Ok(series)
}
