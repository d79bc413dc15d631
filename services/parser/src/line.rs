//! Line classification
//!
//! Each extracted line is matched against an ordered list of rules. The
//! order matters: a header wins over everything, captions and all-India
//! totals are recognised before any non-numeric handling, and only lines
//! with a digit can be data rows.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::names::collapse_whitespace;
use crate::period::{extract_periods, is_header};

/// Captions, footnotes and bullet notes. Matched case-insensitively.
const SKIP_PREFIXES: &[&str] = &["table", "base", "source", "note", "notes", "-:", "*:"];

/// Totals and repeated column-header fragments.
const AGGREGATE_MARKERS: &[&str] = &[
    "all india",
    "all-india",
    "state/union territory",
    "region/state/union",
];

/// Tails of territory names that the PDF wraps onto their own line.
const FRAGMENT_LINES: &[&str] = &["islands", "nagar haveli"];
const FRAGMENT_PREFIX: &str = "and daman";

static DIVIDER_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-+").unwrap());

/// One classified line of extracted text.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    /// Three or more period labels: (re)establishes the header axis.
    Header(Vec<String>),
    Caption,
    Aggregate,
    Fragment,
    /// Non-numeric line with a hyphen, e.g. `"Sikkim - -"`.
    ///
    /// Holds the name before the first ` -` run and the full line, which is
    /// used as a name part when no header is known yet.
    Divider { name: String, text: String },
    /// Non-numeric text that may be the first line of a wrapped name.
    NamePart(String),
    /// Text before the first digit, and everything from the first digit on.
    Data { name: String, payload: String },
}

impl Line {
    pub fn classify(raw: &str) -> Self {
        let line = collapse_whitespace(raw);
        if line.is_empty() {
            return Line::Blank;
        }

        let periods = extract_periods(&line);
        if is_header(&periods) {
            return Line::Header(periods);
        }

        let lowered = line.to_lowercase();
        if SKIP_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
            return Line::Caption;
        }
        if AGGREGATE_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Line::Aggregate;
        }

        match line.find(|c: char| c.is_ascii_digit()) {
            None => {
                if FRAGMENT_LINES.contains(&lowered.as_str()) || lowered.starts_with(FRAGMENT_PREFIX) {
                    Line::Fragment
                } else if line.contains('-') {
                    let name = DIVIDER_SPLIT_RE
                        .split(&line)
                        .next()
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    Line::Divider { name, text: line }
                } else {
                    Line::NamePart(line)
                }
            }
            Some(idx) => Line::Data {
                name: line[..idx].trim().to_string(),
                payload: line[idx..].trim().to_string(),
            },
        }
    }
}
