//! Run artifacts: per-day CSV, JSON report, and the artifact bundle.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::aggregate::AggregateReport;
use crate::config::BacktestConfig;
use crate::runner::RunResult;

// ─── CSV ────────────────────────────────────────────────────────────

/// Render the traded days as CSV with columns `day,pnl,qualifier`.
pub fn days_csv(report: &AggregateReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["day", "pnl", "qualifier"])?;
    for r in &report.results {
        wtr.write_record([
            r.day.to_string(),
            format!("{:.2}", r.pnl),
            r.qualifier.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn write_days_csv(path: &Path, report: &AggregateReport) -> Result<()> {
    let csv = days_csv(report)?;
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

// ─── JSON ───────────────────────────────────────────────────────────

pub fn write_report_json(path: &Path, result: &RunResult) -> Result<()> {
    let json =
        serde_json::to_string_pretty(result).context("failed to serialize RunResult to JSON")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn load_report_json(path: &Path) -> Result<RunResult> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).context("failed to deserialize RunResult from JSON")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set for one run.
///
/// Creates `{index}-{hash8}/` under `output_dir`, where `hash8` is the first
/// eight hex digits of the config hash, containing:
/// - `report.json`: the full `RunResult`
/// - `days.csv`: one row per traded day
/// - `config.toml`: the strategy parameters, loadable with `--config`
///
/// Saving the same run twice overwrites the same directory.
pub fn save_artifacts(result: &RunResult, output_dir: &Path) -> Result<PathBuf> {
    let short_hash: String = result.config_hash.chars().take(8).collect();
    let run_dir = output_dir.join(format!("{}-{}", result.index(), short_hash));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    write_report_json(&run_dir.join("report.json"), result)?;
    write_days_csv(&run_dir.join("days.csv"), &result.report)?;

    let config = toml::to_string(&BacktestConfig::new(result.config.clone()))
        .context("failed to serialize config to TOML")?;
    std::fs::write(run_dir.join("config.toml"), config)?;

    Ok(run_dir)
}
