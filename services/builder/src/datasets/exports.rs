//! State-wise merchandise exports, converted from USD million to ₹ crore

use anyhow::Result;
use parser::{pick_period_value, Series};
use serde::Serialize;
use std::path::Path;

use super::{descending, load_primary_series, round2, Dataset};
use crate::config::ExportsConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportsRow {
    pub state: String,
    /// ₹ crore (approx)
    pub exports: f64,
    /// Percent of the all-state total
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportsNational {
    pub total_exports: f64,
    pub growth_rate: f64,
}

pub fn build(config: &ExportsConfig, source: &str, exports: &Series) -> Dataset<ExportsRow, ExportsNational> {
    // 1 USD million = usd_to_inr * 10 lakh rupees = usd_to_inr / 10 crore
    let crore_per_usd_million = config.usd_to_inr / 10.0;

    let mut total_previous = 0.0;
    let mut data: Vec<ExportsRow> = Vec::new();
    for (state, values) in &exports.rows {
        let Some(current) = pick_period_value(values, &exports.periods, &config.year) else {
            continue;
        };
        if let Some(previous) = pick_period_value(values, &exports.periods, &config.previous_year) {
            total_previous += previous * crore_per_usd_million;
        }
        data.push(ExportsRow {
            state: state.clone(),
            exports: round2(current * crore_per_usd_million),
            share: 0.0,
        });
    }

    let total: f64 = data.iter().map(|r| r.exports).sum();
    if total != 0.0 {
        for row in &mut data {
            row.share = round2(row.exports / total * 100.0);
        }
    }
    data.sort_by(|a, b| descending(Some(a.exports), Some(b.exports)));

    let growth_rate = if total_previous != 0.0 {
        (total - total_previous) / total_previous * 100.0
    } else {
        0.0
    };

    Dataset {
        title: "State-wise Exports".to_string(),
        description: format!(
            "State-wise exports (approx ₹ Crore from USD millions, USD@{})",
            config.usd_to_inr
        ),
        source: source.to_string(),
        year: config.year.clone(),
        unit: Some("₹ Crore (approx)".to_string()),
        data,
        national: ExportsNational {
            total_exports: round2(total),
            growth_rate: round2(growth_rate),
        },
    }
}

pub fn load(
    config: &ExportsConfig,
    source: &str,
    text_dir: &Path,
) -> Result<Dataset<ExportsRow, ExportsNational>> {
    let exports = load_primary_series(text_dir, &config.exports_document)?;
    Ok(build(config, source, &exports))
}
