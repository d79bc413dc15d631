//! Builder - Turns parsed bulletin tables into published JSON datasets
//!
//! Responsibilities:
//! - Load the dataset config (which documents feed which dataset)
//! - Parse each document's extracted text into per-state series
//! - Derive dataset fields (unit conversions, growth rates, shares)
//! - Write one JSON file per dataset
//!
//! Usage:
//!   # All datasets with config/datasets.json (or built-in defaults):
//!   cargo run --bin builder
//!
//!   # One dataset, without writing:
//!   cargo run --bin builder -- --only gdp --dry-run

mod config;
mod datasets;
mod output;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use config::{load_datasets_config, DatasetsConfig, Env};
use datasets::{banking, exports, gdp, tourism, Dataset};

#[derive(Parser, Debug)]
#[command(name = "builder", about = "Builds state-wise JSON datasets from bulletin tables")]
struct Args {
    /// Path to datasets config file (defaults to config/datasets.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the documents, PDF or extracted text (overrides TEXT_DIR)
    #[arg(long)]
    text_dir: Option<PathBuf>,

    /// Directory the JSON datasets are written to (overrides OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only build this dataset
    #[arg(long, value_enum)]
    only: Option<DatasetKind>,

    /// Dry run - parse and summarise, don't write files
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DatasetKind {
    Gdp,
    Banking,
    Exports,
    Tourism,
}

impl DatasetKind {
    const ALL: [DatasetKind; 4] = [Self::Gdp, Self::Banking, Self::Exports, Self::Tourism];

    fn output_name(self, config: &DatasetsConfig) -> &str {
        match self {
            Self::Gdp => &config.gdp.output,
            Self::Banking => &config.banking.output,
            Self::Exports => &config.exports.output,
            Self::Tourism => &config.tourism.output,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gdp => "gdp",
            Self::Banking => "banking",
            Self::Exports => "exports",
            Self::Tourism => "tourism",
        };
        f.write_str(name)
    }
}

/// Write (or in dry-run, just summarise) one dataset; returns its row count.
fn emit<R: Serialize, N: Serialize>(
    dataset: &Dataset<R, N>,
    path: &Path,
    dry_run: bool,
) -> Result<usize> {
    println!("  {} ({})", dataset.title, dataset.year);
    println!("  Rows: {}", dataset.data.len());
    if dry_run {
        println!("  Dry run - would write: {}", path.display());
    } else {
        output::write_dataset(dataset, path)?;
        println!("  Wrote: {}", path.display());
    }
    Ok(dataset.data.len())
}

fn build_dataset(
    kind: DatasetKind,
    config: &DatasetsConfig,
    text_dir: &Path,
    output_path: &Path,
    dry_run: bool,
) -> Result<usize> {
    let source = config.source.as_str();
    match kind {
        DatasetKind::Gdp => emit(&gdp::load(&config.gdp, source, text_dir)?, output_path, dry_run),
        DatasetKind::Banking => emit(
            &banking::load(&config.banking, source, text_dir)?,
            output_path,
            dry_run,
        ),
        DatasetKind::Exports => emit(
            &exports::load(&config.exports, source, text_dir)?,
            output_path,
            dry_run,
        ),
        DatasetKind::Tourism => emit(
            &tourism::load(&config.tourism, source, text_dir)?,
            output_path,
            dry_run,
        ),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();
    let env = Env::from_env();
    let text_dir = args.text_dir.unwrap_or(env.text_dir);
    let output_dir = args.output_dir.unwrap_or(env.output_dir);

    let config = load_datasets_config(args.config.as_deref())?;

    println!("=== State Datasets Builder ===");
    println!("Config version: {}", config.version);
    println!("Text dir: {}", text_dir.display());
    println!("Output dir: {}", output_dir.display());
    println!("Mode: {}", if args.dry_run { "dry-run" } else { "live" });

    let kinds: Vec<DatasetKind> = match args.only {
        Some(kind) => vec![kind],
        None => DatasetKind::ALL.to_vec(),
    };

    let mut built = 0;
    let mut failed = 0;
    for kind in kinds {
        println!("\n[{}]", kind);
        let output_path = output_dir.join(kind.output_name(&config));
        match build_dataset(kind, &config, &text_dir, &output_path, args.dry_run) {
            Ok(rows) => {
                tracing::debug!(dataset = %kind, rows, "dataset built");
                built += 1;
            }
            Err(e) => {
                eprintln!("  ✗ Failed: {:#}", e);
                failed += 1;
            }
        }
    }

    println!("\n=== Build Summary ===");
    println!("Built: {}", built);
    println!("Failed: {}", failed);

    if failed > 0 {
        anyhow::bail!("{} dataset(s) failed to build", failed);
    }
    Ok(())
}
