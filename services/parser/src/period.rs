//! Period labels: calendar years ("2016") and fiscal ranges ("2016-17")

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of period labels on a line for it to count as a header.
pub const HEADER_MIN_PERIODS: usize = 3;

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}(?:-\d{2})?\b").unwrap());

/// All period labels on a line, in the order they appear.
pub fn extract_periods(line: &str) -> Vec<String> {
    PERIOD_RE
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Chronological sort key: the leading 4-digit year of the label.
pub fn sort_key(label: &str) -> u32 {
    label
        .get(..4)
        .and_then(|year| year.parse().ok())
        .unwrap_or(0)
}

pub fn is_header(periods: &[String]) -> bool {
    periods.len() >= HEADER_MIN_PERIODS
}

/// Global period axis for one document.
///
/// Labels are kept unique in first-seen order until [`PeriodAxis::into_sorted`]
/// produces the final chronological axis.
#[derive(Debug, Default, Clone)]
pub struct PeriodAxis {
    labels: Vec<String>,
}

impl PeriodAxis {
    pub fn merge(&mut self, periods: &[String]) {
        for period in periods {
            if !self.labels.contains(period) {
                self.labels.push(period.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Stable sort, so labels sharing a leading year keep first-seen order.
    pub fn into_sorted(mut self) -> Vec<String> {
        self.labels.sort_by_key(|label| sort_key(label));
        self.labels
    }
}
