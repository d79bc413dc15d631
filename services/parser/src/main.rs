//! Parser - Extracts a per-state series from one bulletin table
//!
//! Reads one document, either the bulletin PDF or its extracted text (pages
//! separated by form feeds), and prints the period axis and state rows as
//! JSON on stdout. States appear in document order.
//!
//! Usage:
//!   cargo run --bin parser -- --input data/pdf/21T_....PDF --pretty
//!   cargo run --bin parser -- --input data/text/21T_....txt

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use parser::{parse, read_document_lines, to_json, Series};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parser", about = "Parses an extracted bulletin table into per-state series")]
struct Args {
    /// One document: a `.pdf` file, or its extracted text
    #[arg(long)]
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long, default_value = "false")]
    pretty: bool,
}

/// JSON shape of a parsed table
#[derive(Debug, Serialize)]
struct SeriesOutput {
    periods: Vec<String>,
    series: IndexMap<String, Vec<serde_json::Value>>,
}

impl From<Series> for SeriesOutput {
    fn from(series: Series) -> Self {
        let rows = series
            .rows
            .into_iter()
            .map(|(name, values)| (name, values.into_iter().map(to_json).collect()))
            .collect();
        Self {
            periods: series.periods,
            series: rows,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let lines = read_document_lines(&args.input)
        .with_context(|| format!("Failed to read line source {}", args.input.display()))?;
    let series = parse(&lines);
    tracing::info!(
        input = %args.input.display(),
        periods = series.periods.len(),
        states = series.len(),
        "parsed document"
    );

    let output = SeriesOutput::from(series);
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}
