//! Minute-bar loading from CSV.
//!
//! Files live at `<data_dir>/<index>.minute.csv` with a header row and the
//! columns `timestamp,datetime,open,high,low,close`; extra trailing columns
//! are ignored. `datetime` is ISO-8601 and its wall-clock part is used as-is.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::info;

use breakout_core::domain::PriceBar;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no minute data file at {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("line {line}: cannot parse datetime '{value}'")]
    BadDatetime { line: u64, value: String },
}

/// Bars of one instrument plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedBars {
    pub path: PathBuf,
    pub bars: Vec<PriceBar>,
    /// BLAKE3 over all parsed bar fields, for run fingerprints.
    pub dataset_hash: String,
}

/// Path of an instrument's minute file inside `data_dir`.
pub fn minute_file(data_dir: &Path, index: &str) -> PathBuf {
    data_dir.join(format!("{index}.minute.csv"))
}

/// Load `<data_dir>/<index>.minute.csv`.
pub fn load_minute_bars(data_dir: &Path, index: &str) -> Result<LoadedBars, LoadError> {
    let path = minute_file(data_dir, index);
    if !path.is_file() {
        return Err(LoadError::NotFound(path));
    }
    let file = std::fs::File::open(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let bars = read_minute_bars(file)?;
    let dataset_hash = compute_dataset_hash(&bars);
    info!(path = %path.display(), bars = bars.len(), "loaded minute bars");
    Ok(LoadedBars {
        path,
        bars,
        dataset_hash,
    })
}

/// Parse minute bars from any CSV reader. Blank lines are skipped.
pub fn read_minute_bars<R: io::Read>(reader: R) -> Result<Vec<PriceBar>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 6 {
            return Err(LoadError::MalformedRow {
                line,
                reason: format!("expected at least 6 columns, found {}", record.len()),
            });
        }

        let datetime = parse_datetime(&record[1]).ok_or_else(|| LoadError::BadDatetime {
            line,
            value: record[1].to_string(),
        })?;
        let price = |idx: usize, name: &str| -> Result<f64, LoadError> {
            record[idx].parse::<f64>().map_err(|e| LoadError::MalformedRow {
                line,
                reason: format!("{name} '{}': {e}", &record[idx]),
            })
        };

        bars.push(PriceBar {
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            open: price(2, "open")?,
            high: price(3, "high")?,
            low: price(4, "low")?,
            close: price(5, "close")?,
        });
    }
    Ok(bars)
}

/// Wall-clock datetime of an ISO-8601 string, with or without seconds or offset.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Deterministic BLAKE3 hash over all bar data.
pub fn compute_dataset_hash(bars: &[PriceBar]) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(&bar.month.to_le_bytes());
        hasher.update(&bar.day.to_le_bytes());
        hasher.update(&bar.hour.to_le_bytes());
        hasher.update(&bar.minute.to_le_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
