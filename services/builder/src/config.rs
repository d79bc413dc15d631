//! Builder configuration: environment paths and the dataset config file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/datasets.json";
const DEFAULT_SOURCE: &str = "RBI Handbook of Statistics on Indian States, 2024-25";

/// Directories taken from the environment (or `.env`).
#[derive(Debug, Clone)]
pub struct Env {
    pub text_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Env {
    pub fn from_env() -> Self {
        Self {
            text_dir: PathBuf::from(
                std::env::var("TEXT_DIR").unwrap_or_else(|_| "./data/text".to_string()),
            ),
            output_dir: PathBuf::from(
                std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "./data/json".to_string()),
            ),
        }
    }
}

/// Which documents feed which dataset, and the periods each dataset reports.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetsConfig {
    pub version: String,
    /// Citation written into every dataset
    pub source: String,
    pub gdp: GdpConfig,
    pub banking: BankingConfig,
    pub exports: ExportsConfig,
    pub tourism: TourismConfig,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            source: DEFAULT_SOURCE.to_string(),
            gdp: GdpConfig::default(),
            banking: BankingConfig::default(),
            exports: ExportsConfig::default(),
            tourism: TourismConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GdpConfig {
    /// GSDP at current prices, ₹ lakh
    pub gsdp_document: String,
    /// Per capita NSDP, ₹
    pub per_capita_document: String,
    pub year: String,
    pub previous_year: String,
    pub per_capita_year: String,
    pub output: String,
}

impl Default for GdpConfig {
    fn default() -> Self {
        Self {
            gsdp_document: "21T_11122025D994949B48C44B68B4465FBB9ADDFF3D".to_string(),
            per_capita_document: "19T_11122025B8CC230E4A34431999B4D6A107707BCA".to_string(),
            year: "2016-17".to_string(),
            previous_year: "2015-16".to_string(),
            per_capita_year: "2016-17".to_string(),
            output: "gdp.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BankingConfig {
    pub offices_document: String,
    pub deposits_document: String,
    pub credit_document: String,
    pub cd_ratio_document: String,
    pub year: String,
    pub output: String,
}

impl Default for BankingConfig {
    fn default() -> Self {
        Self {
            offices_document: "152T_1112202512B2BF0FBDB74FF48CF835E2A6B7C592".to_string(),
            deposits_document: "155T_11122025BC88547570414295AB088FBCF5C90806".to_string(),
            credit_document: "156T_1112202520771561966C49F1B9C00F56ACF97557".to_string(),
            cd_ratio_document: "154T_111220253A00C718ED584E7C850BBCAC3B2FA18B".to_string(),
            year: "2014".to_string(),
            output: "banking.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportsConfig {
    /// State-wise exports, USD million
    pub exports_document: String,
    pub year: String,
    pub previous_year: String,
    /// Rupees per US dollar used for the crore conversion
    pub usd_to_inr: f64,
    pub output: String,
}

impl Default for ExportsConfig {
    fn default() -> Self {
        Self {
            exports_document: "181T_1112202574821AB7B09745AC82B77B352FF4E3EB".to_string(),
            year: "2023-24".to_string(),
            previous_year: "2022-23".to_string(),
            usd_to_inr: 83.0,
            output: "exports.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TourismConfig {
    /// Domestic tourist visits, million
    pub domestic_document: String,
    /// Foreign tourist visits, lakh
    pub foreign_document: String,
    pub year: String,
    pub output: String,
}

impl Default for TourismConfig {
    fn default() -> Self {
        Self {
            domestic_document: "13T_1112202529FAEEB805FE49E78D8A39C8679DEC25".to_string(),
            foreign_document: "182T_111220255D1D4A3006504017A6916B26516E0915".to_string(),
            year: "2016".to_string(),
            output: "tourism.json".to_string(),
        }
    }
}

/// Load the dataset config. A missing file at the default path means defaults.
pub fn load_datasets_config(path: Option<&Path>) -> Result<DatasetsConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                tracing::info!("no {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                return Ok(DatasetsConfig::default());
            }
            default
        }
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read datasets config {}", path.display()))?;
    let config: DatasetsConfig =
        serde_json::from_str(&content).context("Failed to parse datasets config")?;
    Ok(config)
}
