//! Scheduled commercial bank offices, deposits and credit

use anyhow::Result;
use parser::{pick_period_value, Series};
use serde::Serialize;
use std::path::Path;

use super::{descending, load_primary_series, load_series, mean2, round2, Dataset};
use crate::config::BankingConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingRow {
    pub state: String,
    pub branches: i64,
    pub deposits: Option<f64>,
    pub credit: Option<f64>,
    pub cd_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankingNational {
    #[serde(rename = "totalBranches")]
    pub total_branches: i64,
    #[serde(rename = "totalDeposits")]
    pub total_deposits: f64,
    #[serde(rename = "totalCredit")]
    pub total_credit: f64,
    #[serde(rename = "avgCDRatio")]
    pub avg_cd_ratio: f64,
}

/// The tables the banking dataset is assembled from.
pub struct BankingTables<'a> {
    pub offices: &'a Series,
    pub deposits: &'a Series,
    pub credit: &'a Series,
    pub cd_ratio: &'a Series,
}

pub fn build(
    config: &BankingConfig,
    source: &str,
    tables: &BankingTables<'_>,
) -> Dataset<BankingRow, BankingNational> {
    let year = config.year.as_str();
    let mut data: Vec<BankingRow> = tables
        .offices
        .rows
        .iter()
        .filter_map(|(state, values)| {
            let branches = pick_period_value(values, &tables.offices.periods, year)?;
            Some(BankingRow {
                state: state.clone(),
                branches: branches.trunc() as i64,
                deposits: tables.deposits.pick(state, year).map(round2),
                credit: tables.credit.pick(state, year).map(round2),
                cd_ratio: tables.cd_ratio.pick(state, year).map(round2),
            })
        })
        .collect();
    data.sort_by(|a, b| descending(a.deposits, b.deposits));

    let cd_ratios: Vec<f64> = data.iter().filter_map(|r| r.cd_ratio).collect();
    let national = BankingNational {
        total_branches: data.iter().map(|r| r.branches).sum(),
        total_deposits: round2(data.iter().filter_map(|r| r.deposits).sum()),
        total_credit: round2(data.iter().filter_map(|r| r.credit).sum()),
        avg_cd_ratio: mean2(&cd_ratios),
    };

    Dataset {
        title: "Banking Statistics (Scheduled Commercial Banks)".to_string(),
        description: "State-wise number of offices, deposits, and credit (As at end-March)"
            .to_string(),
        source: source.to_string(),
        year: config.year.clone(),
        unit: None,
        data,
        national,
    }
}

pub fn load(
    config: &BankingConfig,
    source: &str,
    text_dir: &Path,
) -> Result<Dataset<BankingRow, BankingNational>> {
    let offices = load_primary_series(text_dir, &config.offices_document)?;
    let deposits = load_series(text_dir, &config.deposits_document)?;
    let credit = load_series(text_dir, &config.credit_document)?;
    let cd_ratio = load_series(text_dir, &config.cd_ratio_document)?;
    let tables = BankingTables {
        offices: &offices,
        deposits: &deposits,
        credit: &credit,
        cd_ratio: &cd_ratio,
    };
    Ok(build(config, source, &tables))
}
