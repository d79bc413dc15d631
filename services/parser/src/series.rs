//! Forward scan from classified lines to a per-state series

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::line::Line;
use crate::names::{is_region, normalize_state_name};
use crate::numbers::{align_right, parse_values};
use crate::period::PeriodAxis;

/// Parsed table: a chronological period axis and one aligned row per state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub periods: Vec<String>,
    /// In order of first appearance in the document
    pub rows: IndexMap<String, Vec<Option<f64>>>,
}

impl Series {
    pub fn get(&self, entity: &str) -> Option<&[Option<f64>]> {
        self.rows.get(entity).map(Vec::as_slice)
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value for `entity` at `period`, see [`pick_period_value`].
    ///
    /// `None` when the entity is not in this table at all.
    pub fn pick(&self, entity: &str, period: &str) -> Option<f64> {
        self.get(entity)
            .and_then(|values| pick_period_value(values, &self.periods, period))
    }
}

/// Value at `target`, falling back to the most recent period when the table
/// does not cover `target`.
pub fn pick_period_value(values: &[Option<f64>], periods: &[String], target: &str) -> Option<f64> {
    match periods.iter().position(|p| p == target) {
        Some(idx) => values.get(idx).copied().flatten(),
        None => values.last().copied().flatten(),
    }
}

/// Carried context of the scan.
#[derive(Debug, Default)]
struct ScanState {
    /// Most recent header line's periods; empty until one is seen.
    header: Vec<String>,
    axis: PeriodAxis,
    /// First line(s) of a name that wraps onto the next numeric line.
    pending: String,
    rows: IndexMap<String, HashMap<String, f64>>,
}

impl ScanState {
    fn push_pending(&mut self, text: &str) {
        self.pending = format!("{} {}", self.pending, text).trim().to_string();
    }

    fn take_pending(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }

    fn apply(&mut self, line: Line) {
        match line {
            Line::Blank | Line::Fragment => {}
            Line::Header(periods) => {
                self.axis.merge(&periods);
                self.header = periods;
                self.pending.clear();
            }
            Line::Caption | Line::Aggregate => self.pending.clear(),
            Line::Divider { name, text } => {
                if self.header.is_empty() {
                    self.push_pending(&text);
                    return;
                }
                let name = normalize_state_name(&name);
                if !name.is_empty() && !is_region(&name) {
                    self.rows.entry(name).or_default();
                }
            }
            Line::NamePart(text) => self.push_pending(&text),
            Line::Data { name, payload } => self.apply_data(name, &payload),
        }
    }

    fn apply_data(&mut self, fragment: String, payload: &str) {
        let pending = self.take_pending();
        let raw_name = match (pending.is_empty(), fragment.is_empty()) {
            (true, _) => fragment,
            (false, true) => pending,
            (false, false) => format!("{} {}", pending, fragment),
        };
        if raw_name.is_empty() {
            tracing::trace!(payload, "skipping: data row without a name");
            return;
        }
        if self.header.is_empty() {
            tracing::trace!(name = %raw_name, "skipping: data row before any header");
            return;
        }

        let values = align_right(parse_values(payload), self.header.len());
        let name = normalize_state_name(&raw_name);
        if name.is_empty() || is_region(&name) {
            tracing::trace!(name = %raw_name, "skipping: not a state row");
            return;
        }

        let row = self.rows.entry(name).or_default();
        for (period, value) in self.header.iter().zip(values) {
            if let Some(value) = value {
                *row.entry(period.clone()).or_insert(0.0) += value;
            }
        }
    }

    fn finish(self) -> Series {
        let periods = self.axis.into_sorted();
        let rows = self
            .rows
            .into_iter()
            .map(|(name, by_period)| {
                let aligned = periods.iter().map(|p| by_period.get(p).copied()).collect();
                (name, aligned)
            })
            .collect();
        Series { periods, rows }
    }
}

/// Parse one document's extracted lines into a [`Series`].
///
/// Never fails: lines matching no rule are ignored, rows that cannot be
/// aligned to a header are dropped, and repeated rows for the same state are
/// summed period by period. States keep the order in which they first appear.
pub fn parse<I, S>(lines: I) -> Series
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ScanState::default();
    for line in lines {
        state.apply(Line::classify(line.as_ref()));
    }
    let series = state.finish();
    tracing::debug!(
        periods = series.periods.len(),
        entities = series.len(),
        "parsed table"
    );
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::sort_key;

    fn row<'a>(series: &'a Series, name: &str) -> &'a [Option<f64>] {
        series
            .get(name)
            .unwrap_or_else(|| panic!("missing row {name}: {:?}", series.rows.keys()))
    }

    // -------------------------------------------------------------------------
    // DETERMINISM TESTS - Same input MUST produce same output
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_determinism() {
        let lines = [
            "Table 21: Gross State Domestic Product",
            "State 2014 2015 2016",
            "Goa 10 20 30",
            "Arunachal",
            "Pradesh 1 2 3",
            "Goa 1 1 1",
        ];
        let baseline = parse(lines);
        for _ in 0..10 {
            assert_eq!(parse(lines), baseline);
        }
    }

    // -------------------------------------------------------------------------
    // PERIOD AXIS TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_axis_sorted_and_unique() {
        let lines = [
            "State 2018-19 2019-20 2020-21",
            "Goa 1 2 3",
            "State 2016-17 2017-18 2018-19",
            "Kerala 4 5 6",
        ];
        let series = parse(lines);
        assert_eq!(
            series.periods,
            vec!["2016-17", "2017-18", "2018-19", "2019-20", "2020-21"]
        );
        assert_eq!(row(&series, "Goa"), &[None, None, Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(row(&series, "Kerala"), &[Some(4.0), Some(5.0), Some(6.0), None, None]);
    }

    #[test]
    fn test_every_row_matches_axis_length() {
        let lines = [
            "State 2014 2015 2016",
            "Goa 1",
            "Kerala 1 2 3 4 5",
            "Bihar -",
            "Assam - -",
            "State 2017 2018 2019",
            "Punjab 7 8 9",
        ];
        let series = parse(lines);
        assert_eq!(series.periods.len(), 6);
        for (name, values) in &series.rows {
            assert_eq!(values.len(), series.periods.len(), "row {name}");
        }
    }

    #[test]
    fn test_table_shapes_keep_axis_invariants() {
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("fiscal header", vec!["State 2014-15 2015-16 2016-17", "Goa 1 2 3"]),
            ("calendar header", vec!["2014 2015 2016", "Goa 1 2 3", "Kerala 4 5 6"]),
            ("short rows", vec!["2014 2015 2016 2017", "Goa 1", "Kerala 1 2", "Assam"]),
            ("long rows", vec!["2014 2015 2016", "Goa 1 2 3 4 5 6", "Kerala 9 9 9 9"]),
            ("dashes", vec!["2014 2015 2016", "Goa - 5 -", "Sikkim - -", "Bihar 1 - 2"]),
            (
                "wrapped names",
                vec!["2014 2015 2016", "Arunachal", "Pradesh 1 2 3", "Andaman & Nicobar", "4 5 6"],
            ),
            ("duplicates", vec!["2014 2015 2016", "Goa 1 2 3", "Goa 1 1", "Orissa 2", "Odisha 3"]),
            (
                "overlapping headers",
                vec![
                    "State 2018-19 2019-20 2020-21",
                    "Goa 1 2 3",
                    "State 2016-17 2017-18 2018-19",
                    "Goa 4 5 6",
                    "Kerala 7",
                ],
            ),
            (
                "mixed labels",
                vec!["2016-17 2017 2018-19", "Goa 1 2 3", "2015 2016 2017", "Kerala 4 5 6"],
            ),
            ("repeated header", vec!["2014 2015 2016", "Goa 1 2 3", "2014 2015 2016", "Goa 1 2 3"]),
            (
                "noise",
                vec![
                    "Table 21: GSDP",
                    "Goa 9 9 9",
                    "2014 2015 2016",
                    "All India 1 2 3",
                    "Source: RBI",
                    "Northern Region 1 2 3",
                    "Islands",
                    "Kerala 1 2 3",
                ],
            ),
            ("no header", vec!["Goa 1 2 3"]),
        ];

        for (label, lines) in cases {
            let series = parse(&lines);

            assert!(
                series.periods.windows(2).all(|w| sort_key(&w[0]) <= sort_key(&w[1])),
                "{label}: axis not chronological: {:?}",
                series.periods
            );
            let unique: std::collections::HashSet<&String> = series.periods.iter().collect();
            assert_eq!(unique.len(), series.periods.len(), "{label}: duplicate periods");

            for (name, values) in &series.rows {
                assert_eq!(values.len(), series.periods.len(), "{label}: row {name}");
            }

            let again = parse(&lines);
            assert_eq!(again, series, "{label}: not deterministic");
            assert!(
                again.entities().eq(series.entities()),
                "{label}: row order changed"
            );
        }
    }

    // -------------------------------------------------------------------------
    // ORDER TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_rows_in_document_order() {
        let lines = ["2014 2015 2016", "Kerala 1 1 1", "Bihar 1 1 1", "Goa 1 1 1", "Kerala 1 1 1"];
        let series = parse(lines);
        assert_eq!(
            series.entities().collect::<Vec<_>>(),
            vec!["Kerala", "Bihar", "Goa"]
        );
    }

    #[test]
    fn test_divider_row_keeps_its_place() {
        let lines = ["2014 2015 2016", "Punjab 1 2 3", "Telangana - -", "Assam 4 5 6"];
        let series = parse(lines);
        assert_eq!(
            series.entities().collect::<Vec<_>>(),
            vec!["Punjab", "Telangana", "Assam"]
        );
    }

    // -------------------------------------------------------------------------
    // MERGE TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_duplicate_rows_summed() {
        let lines = ["2016 2017 2018", "Goa 10 20", "Goa 5 5"];
        let series = parse(lines);
        assert_eq!(row(&series, "Goa"), &[None, Some(15.0), Some(25.0)]);
    }

    #[test]
    fn test_duplicate_under_new_header_fills_new_periods() {
        let lines = [
            "2014 2015 2016",
            "Goa 1 2 3",
            "2017 2018 2019",
            "Goa 4 5 6",
        ];
        let series = parse(lines);
        assert_eq!(
            row(&series, "Goa"),
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)]
        );
    }

    #[test]
    fn test_missing_values_never_overwrite() {
        let lines = ["2014 2015 2016", "Goa 1 2 3", "Goa - 0 -"];
        let series = parse(lines);
        assert_eq!(row(&series, "Goa"), &[Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_aliases_merge_into_one_row() {
        let lines = ["2014 2015 2016", "Orissa 1 2 3", "Odisha 10 10 10"];
        let series = parse(lines);
        assert_eq!(series.len(), 1);
        assert_eq!(row(&series, "Odisha"), &[Some(11.0), Some(12.0), Some(13.0)]);
    }

    // -------------------------------------------------------------------------
    // NAME TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_wrapped_name() {
        let lines = ["2015 2016 2017", "Arunachal", "Pradesh 12 34"];
        let series = parse(lines);
        assert_eq!(row(&series, "Arunachal Pradesh"), &[None, Some(12.0), Some(34.0)]);
    }

    #[test]
    fn test_wrapped_name_over_bare_numbers() {
        let lines = ["2015 2016 2017", "Andaman & Nicobar", "1 2 3"];
        let series = parse(lines);
        assert_eq!(
            row(&series, "Andaman and Nicobar Islands"),
            &[Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_wrapped_name_with_fragment_line() {
        let lines = ["2015 2016 2017", "Andaman & Nicobar 1 2 3", "Islands"];
        let series = parse(lines);
        assert_eq!(series.len(), 1);
        assert!(series.get("Andaman and Nicobar Islands").is_some());
    }

    #[test]
    fn test_caption_resets_pending_name() {
        let lines = ["2015 2016 2017", "Arunachal", "Source: RBI", "Pradesh 12 34"];
        let series = parse(lines);
        assert!(series.get("Arunachal Pradesh").is_none());
        assert!(series.get("Pradesh").is_some());
    }

    #[test]
    fn test_header_resets_pending_name() {
        let lines = ["Arunachal", "2015 2016 2017", "12 34 56"];
        let series = parse(lines);
        assert!(series.is_empty());
    }

    #[test]
    fn test_unnamed_row_dropped() {
        let lines = ["2015 2016 2017", "1 2 3"];
        assert!(parse(lines).is_empty());
    }

    #[test]
    fn test_region_rows_dropped() {
        let lines = [
            "2015 2016 2017",
            "Northern Region 1 2 3",
            "North-Eastern Region - -",
            "Haryana 4 5 6",
        ];
        let series = parse(lines);
        assert_eq!(series.entities().collect::<Vec<_>>(), vec!["Haryana"]);
    }

    #[test]
    fn test_divider_records_empty_entity() {
        let lines = ["2015 2016 2017", "Telangana - -"];
        let series = parse(lines);
        let empty: [Option<f64>; 3] = [None; 3];
        assert_eq!(row(&series, "Telangana"), &empty);
    }

    #[test]
    fn test_divider_before_header_is_name_part() {
        let lines = ["Jammu -", "2015 2016 2017", "Kerala 1 2 3"];
        let series = parse(lines);
        assert_eq!(series.entities().collect::<Vec<_>>(), vec!["Kerala"]);
    }

    // -------------------------------------------------------------------------
    // VALUE TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_dash_is_no_data() {
        let lines = ["2015 2016 2017", "Sikkim - 5"];
        let series = parse(lines);
        assert_eq!(row(&series, "Sikkim"), &[None, None, Some(5.0)]);
    }

    #[test]
    fn test_inner_dash_takes_no_column() {
        let lines = ["2015 2016 2017", "Goa 5 - 7", "Kerala - 0 -"];
        let series = parse(lines);
        assert_eq!(row(&series, "Goa"), &[None, Some(5.0), Some(7.0)]);
        assert_eq!(row(&series, "Kerala"), &[None, None, Some(0.0)]);
    }

    #[test]
    fn test_extra_values_truncated() {
        let lines = ["2015 2016 2017", "Goa 1 2 3 4 5"];
        let series = parse(lines);
        assert_eq!(row(&series, "Goa"), &[Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_zero_is_kept() {
        let lines = ["2015 2016 2017", "Goa 0 0 1"];
        let series = parse(lines);
        assert_eq!(row(&series, "Goa"), &[Some(0.0), Some(0.0), Some(1.0)]);
    }

    // -------------------------------------------------------------------------
    // SKIP TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_rows_before_header_dropped() {
        let lines = ["Goa 1 2 3", "Kerala 4 5 6"];
        let series = parse(lines);
        assert!(series.is_empty());
        assert!(series.periods.is_empty());
    }

    #[test]
    fn test_all_india_never_recorded() {
        let lines = ["2015 2016 2017", "All India 500 600", "ALL-INDIA 1 2 3"];
        assert!(parse(lines).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let series = parse(Vec::<String>::new());
        assert_eq!(series, Series::default());
    }

    // -------------------------------------------------------------------------
    // PICK TESTS
    // -------------------------------------------------------------------------

    #[test]
    fn test_pick_exact_period() {
        let lines = ["2015-16 2016-17 2017-18", "Goa 1 2 3"];
        let series = parse(lines);
        assert_eq!(series.pick("Goa", "2016-17"), Some(2.0));
    }

    #[test]
    fn test_pick_falls_back_to_latest() {
        let lines = ["2015-16 2016-17 2017-18", "Goa 1 2 3"];
        let series = parse(lines);
        assert_eq!(series.pick("Goa", "2023-24"), Some(3.0));
    }

    #[test]
    fn test_pick_unknown_entity() {
        let lines = ["2015-16 2016-17 2017-18", "Goa 1 2 3"];
        assert_eq!(parse(lines).pick("Kerala", "2016-17"), None);
    }

    #[test]
    fn test_pick_empty_values() {
        assert_eq!(pick_period_value(&[], &[], "2016"), None);
    }
}
