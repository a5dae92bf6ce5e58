//! Input loading: the project score sheet (CSV) and the market data file (JSON).
//!
//! A `LoadError` here is fatal — the run aborts before any API call is made.
//! Individual bad rows (missing symbol) are skipped with a warning instead,
//! since one broken row is a data problem, not a reason to stop the run.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{BenchmarkInputs, MarketData, ProjectRecord};

const COL_PROJECT: &str = "Project";
const COL_SYMBOL: &str = "Symbol";
const COL_SECTOR: &str = "Market Sector";
const COL_GROWTH: &str = "UGS";
const COL_EARNING: &str = "EQS";
const COL_FAIR_VALUE: &str = "FVS";
const COL_SAFETY: &str = "SS";

const DEFAULT_SECTOR: &str = "Cryptocurrency";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("score sheet {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },
}

/// Loads the score sheet into project records, one per row with a usable symbol.
pub fn load_score_sheet(path: &Path) -> Result<Vec<ProjectRecord>, LoadError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: display.clone(),
            source,
        })?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let project_idx = column(COL_PROJECT).ok_or_else(|| LoadError::MissingColumn {
        path: display.clone(),
        column: COL_PROJECT.to_string(),
    })?;
    let symbol_idx = column(COL_SYMBOL).ok_or_else(|| LoadError::MissingColumn {
        path: display.clone(),
        column: COL_SYMBOL.to_string(),
    })?;
    let sector_idx = column(COL_SECTOR);
    let growth_idx = column(COL_GROWTH);
    let earning_idx = column(COL_EARNING);
    let fair_value_idx = column(COL_FAIR_VALUE);
    let safety_idx = column(COL_SAFETY);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| LoadError::Csv {
            path: display.clone(),
            source,
        })?;

        let name = row.get(project_idx).unwrap_or_default().trim().to_string();
        let symbol = row
            .get(symbol_idx)
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if symbol.is_empty() {
            warn!("Skipping row with missing symbol (project: {name:?})");
            continue;
        }

        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::trim);
        let sector = cell(sector_idx)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SECTOR)
            .to_string();

        records.push(ProjectRecord {
            name,
            symbol,
            sector,
            scores: BenchmarkInputs {
                growth: parse_score(cell(growth_idx)),
                earning: parse_score(cell(earning_idx)),
                fair_value: parse_score(cell(fair_value_idx)),
                safety: parse_score(cell(safety_idx)),
            },
        });
    }

    info!("Loaded score sheet with {} usable rows", records.len());
    Ok(records)
}

/// Loads the symbol-keyed market data file. Keys are normalized to lowercase.
pub fn load_market_data(path: &Path) -> Result<HashMap<String, MarketData>, LoadError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let raw: HashMap<String, MarketData> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| LoadError::Json {
            path: display,
            source,
        })?;

    let data: HashMap<String, MarketData> = raw
        .into_iter()
        .map(|(symbol, entry)| (symbol.to_lowercase(), entry))
        .collect();
    info!("Loaded market data for {} symbols", data.len());
    Ok(data)
}

fn parse_score(cell: Option<&str>) -> Option<f64> {
    cell.filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}
