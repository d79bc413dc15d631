//! Numeric payload of a data row
//!
//! A value is `Option<f64>`: `None` is "no data", which is never the same
//! thing as zero.

use once_cell::sync::Lazy;
use regex::Regex;

static VALUE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-|\d[\d,]*\.?\d*").unwrap());

/// Parse the numeric part of a data row.
///
/// A bare `-` takes no column: it is dropped, and the row is then padded on
/// the left by [`align_right`] like any other short row. Comma grouping is
/// stripped before conversion and tokens that still fail to convert are
/// dropped too.
pub fn parse_values(payload: &str) -> Vec<Option<f64>> {
    VALUE_TOKEN_RE
        .find_iter(payload)
        .filter_map(|m| match m.as_str() {
            "-" => None,
            token => token.replace(',', "").parse::<f64>().ok().map(Some),
        })
        .collect()
}

/// Right-align `values` to `width` columns.
///
/// Short rows are assumed to be missing their earliest periods, so they are
/// padded with `None` on the left. Long rows lose their trailing extras.
pub fn align_right(mut values: Vec<Option<f64>>, width: usize) -> Vec<Option<f64>> {
    if values.len() < width {
        let mut padded = vec![None; width - values.len()];
        padded.append(&mut values);
        return padded;
    }
    values.truncate(width);
    values
}

/// JSON form of a value: whole numbers as integers, `None` as null.
pub fn to_json(value: Option<f64>) -> serde_json::Value {
    match value {
        None => serde_json::Value::Null,
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            serde_json::Value::from(v as i64)
        }
        Some(v) => serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}
