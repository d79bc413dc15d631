//! Domestic and foreign tourist visits

use anyhow::Result;
use parser::{pick_period_value, Series};
use serde::Serialize;
use std::path::Path;

use super::{load_primary_series, load_series, Dataset};
use crate::config::TourismConfig;

const MILLION: f64 = 1_000_000.0;
const LAKH: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourismRow {
    pub state: String,
    pub domestic: i64,
    pub foreign: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismNational {
    pub total_domestic: i64,
    pub total_foreign: i64,
    pub total: i64,
}

/// `domestic` is in million visits, `foreign` in lakh visits.
pub fn build(
    config: &TourismConfig,
    source: &str,
    domestic: &Series,
    foreign: &Series,
) -> Dataset<TourismRow, TourismNational> {
    let mut data: Vec<TourismRow> = domestic
        .rows
        .iter()
        .filter_map(|(state, values)| {
            let domestic_mn = pick_period_value(values, &domestic.periods, &config.year)?;
            let foreign_lakh = foreign.pick(state, &config.year)?;
            let domestic_visits = (domestic_mn * MILLION).round() as i64;
            let foreign_visits = (foreign_lakh * LAKH).round() as i64;
            Some(TourismRow {
                state: state.clone(),
                domestic: domestic_visits,
                foreign: foreign_visits,
                total: domestic_visits + foreign_visits,
            })
        })
        .collect();
    data.sort_by(|a, b| b.total.cmp(&a.total));

    let national = TourismNational {
        total_domestic: data.iter().map(|r| r.domestic).sum(),
        total_foreign: data.iter().map(|r| r.foreign).sum(),
        total: data.iter().map(|r| r.total).sum(),
    };

    Dataset {
        title: "Tourism Statistics".to_string(),
        description: "State-wise domestic and foreign tourist visits".to_string(),
        source: source.to_string(),
        year: config.year.clone(),
        unit: None,
        data,
        national,
    }
}

pub fn load(
    config: &TourismConfig,
    source: &str,
    text_dir: &Path,
) -> Result<Dataset<TourismRow, TourismNational>> {
    let domestic = load_primary_series(text_dir, &config.domestic_document)?;
    let foreign = load_series(text_dir, &config.foreign_document)?;
    Ok(build(config, source, &domestic, &foreign))
}
