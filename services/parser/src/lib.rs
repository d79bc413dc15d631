//! Tabular series parser for statistical bulletins
//!
//! Turns text extracted from PDF tables (one string per physical line, in
//! reading order) into a chronologically sorted period axis and a per-state
//! series of optional values aligned to it.
//!
//! The parser is a best-effort heuristic: it never fails on malformed input.
//! Unrecognised lines are ignored and rows that cannot be aligned are dropped.
//! Same lines in = same series out.

pub mod line;
pub mod names;
pub mod numbers;
pub mod period;
pub mod series;
pub mod source;

pub use line::Line;
pub use names::normalize_state_name;
pub use numbers::{parse_values, to_json};
pub use period::{extract_periods, sort_key};
pub use series::{parse, pick_period_value, Series};
pub use source::{read_document_lines, read_lines, read_pdf_lines, split_lines, SourceError};
