//! State / union territory name normalization

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

const ANDAMAN: &str = "Andaman and Nicobar Islands";
const DNH_DD: &str = "Dadra and Nagar Haveli and Daman and Diu";

/// Historical and alternate spellings, keyed by the lowercased cleaned name.
static STATE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("andaman & nicobar", ANDAMAN),
        ("andaman & nicobar islands", ANDAMAN),
        ("andaman & nicobar island", ANDAMAN),
        ("andaman and nicobar", ANDAMAN),
        ("andaman and nicobar island", ANDAMAN),
        ("dadra & nagar haveli", DNH_DD),
        ("dadra & nagar haveli and daman & diu", DNH_DD),
        ("dadra and nagar haveli and daman and diu", DNH_DD),
        ("daman & diu and dadra &", DNH_DD),
        ("daman and diu and dadra and", DNH_DD),
        ("daman & diu", DNH_DD),
        ("jammu & kashmir", "Jammu and Kashmir"),
        ("nct of delhi", "Delhi"),
        ("delhi", "Delhi"),
        ("orissa", "Odisha"),
        ("pondicherry", "Puducherry"),
    ]
    .into_iter()
    .collect()
});

static FOOTNOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*#@]").unwrap());
static TRAILING_DASHES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\s-+\s*)+$").unwrap());
static AND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+and\s+").unwrap());

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a raw row label into a canonical state name.
///
/// Footnote markers and trailing "- -" connectors are removed, then the
/// alias table is consulted. Names not in the table get `&` spelled out.
pub fn normalize_state_name(raw: &str) -> String {
    let cleaned = FOOTNOTE_RE.replace_all(raw, "");
    let cleaned = TRAILING_DASHES_RE.replace(cleaned.trim(), "");
    let cleaned = collapse_whitespace(&cleaned);

    if let Some(canonical) = STATE_ALIASES.get(cleaned.to_lowercase().as_str()) {
        return (*canonical).to_string();
    }

    let spelled = cleaned.replace('&', "and");
    let spelled = AND_RE.replace_all(&spelled, " and ");
    collapse_whitespace(&spelled)
}

/// Region sub-totals and region headers are never entities.
pub fn is_region(name: &str) -> bool {
    name.to_lowercase().contains("region")
}
