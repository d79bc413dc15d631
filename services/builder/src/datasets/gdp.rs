//! Gross State Domestic Product (current prices)

use anyhow::Result;
use parser::{pick_period_value, Series};
use serde::Serialize;
use std::path::Path;

use super::{descending, load_primary_series, load_series, mean2, round2, Dataset};
use crate::config::GdpConfig;

const LAKH_PER_CRORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GdpRow {
    pub state: String,
    /// ₹ crore
    pub gsdp: f64,
    /// Percent change over the previous year
    pub growth: Option<f64>,
    pub per_capita: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpNational {
    #[serde(rename = "totalGDP")]
    pub total_gdp: f64,
    #[serde(rename = "avgGrowth")]
    pub avg_growth: f64,
    #[serde(rename = "avgPerCapita")]
    pub avg_per_capita: f64,
}

pub fn build(
    config: &GdpConfig,
    source: &str,
    gsdp: &Series,
    per_capita: &Series,
) -> Dataset<GdpRow, GdpNational> {
    let mut data: Vec<GdpRow> = gsdp
        .rows
        .iter()
        .filter_map(|(state, values)| {
            let current = pick_period_value(values, &gsdp.periods, &config.year)?;
            let previous = pick_period_value(values, &gsdp.periods, &config.previous_year);
            let growth = previous
                .filter(|prev| *prev != 0.0)
                .map(|prev| round2((current - prev) / prev * 100.0));

            Some(GdpRow {
                state: state.clone(),
                gsdp: round2(current / LAKH_PER_CRORE),
                growth,
                per_capita: per_capita
                    .pick(state, &config.per_capita_year)
                    .map(|v| v.trunc() as i64),
            })
        })
        .collect();
    data.sort_by(|a, b| descending(Some(a.gsdp), Some(b.gsdp)));

    let growths: Vec<f64> = data.iter().filter_map(|r| r.growth).collect();
    let per_caps: Vec<f64> = data
        .iter()
        .filter_map(|r| r.per_capita.map(|v| v as f64))
        .collect();
    let national = GdpNational {
        total_gdp: round2(data.iter().map(|r| r.gsdp).sum()),
        avg_growth: mean2(&growths),
        avg_per_capita: mean2(&per_caps),
    };

    Dataset {
        title: "Gross State Domestic Product (Current Prices)".to_string(),
        description: "Gross State Domestic Product at current prices (₹ Crore)".to_string(),
        source: source.to_string(),
        year: config.year.clone(),
        unit: Some("₹ Crore".to_string()),
        data,
        national,
    }
}

pub fn load(config: &GdpConfig, source: &str, text_dir: &Path) -> Result<Dataset<GdpRow, GdpNational>> {
    let gsdp = load_primary_series(text_dir, &config.gsdp_document)?;
    let per_capita = load_series(text_dir, &config.per_capita_document)?;
    Ok(build(config, source, &gsdp, &per_capita))
}
