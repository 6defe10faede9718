//! Backtest runner: wires together loading, session grouping, simulation,
//! and aggregation.
//!
//! Entry points, from highest to lowest level:
//! - `run_all()`: several configurations against one data directory.
//! - `run_from_dir()`: loads `<data_dir>/<index>.minute.csv`, then runs.
//! - `run_bars()`: pre-loaded minute bars; filters and groups them into days.
//! - `run_days()`: pre-grouped days; simulates and aggregates.

use std::collections::HashSet;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use breakout_core::domain::{PriceBar, TradingDay};
use breakout_core::{simulate, SimulationError, StrategyConfig};

use crate::aggregate::{aggregate, AggregateReport};
use crate::config::{config_hash, validate_strategy, ConfigError};
use crate::data_loader::{compute_dataset_hash, load_minute_bars, LoadError};
use crate::session::{group_days, SessionWindow};

/// Trading days assumed per month when projecting daily net earnings.
pub const TRADING_DAYS_PER_MONTH: f64 = 20.0;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

/// Complete result of one instrument's run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub config: StrategyConfig,
    pub config_hash: String,
    pub dataset_hash: String,
    pub report: AggregateReport,
}

impl RunResult {
    pub fn index(&self) -> &str {
        &self.config.index
    }

    /// Net earnings per day, `None` when the run produced no trade.
    pub fn net_per_day(&self) -> Option<f64> {
        self.report.stats.as_ref().map(|s| s.pnl_net_per_day)
    }
}

/// Simulate every day and aggregate the outcomes.
///
/// Days are simulated in parallel and aggregated in ascending day order
/// regardless of input order. Every input day counts as a candidate day.
pub fn run_days(
    config: &StrategyConfig,
    days: &[TradingDay],
    dataset_hash: &str,
) -> Result<RunResult, RunError> {
    validate_strategy(config)?;

    let mut ordered: Vec<&TradingDay> = days.iter().collect();
    ordered.sort_by_key(|d| d.key);

    let outcomes = ordered
        .par_iter()
        .map(|day| simulate(config, day))
        .collect::<Result<Vec<_>, _>>()?;

    let report = aggregate(config, &outcomes, days.len());
    info!(
        index = %config.index,
        days = report.num_total_days,
        trades = report.num_total,
        wins = report.num_positive,
        losses = report.num_negative,
        uncertain = report.uncertain_count(),
        "run complete"
    );

    Ok(RunResult {
        config: config.clone(),
        config_hash: config_hash(config),
        dataset_hash: dataset_hash.to_string(),
        report,
    })
}

/// Filter minute bars to the session window, group them into days, and run.
pub fn run_bars(config: &StrategyConfig, bars: &[PriceBar]) -> Result<RunResult, RunError> {
    let window = SessionWindow::from_config(config);
    let days = group_days(bars, &window, config.trade_window);
    info!(index = %config.index, bars = bars.len(), days = days.len(), "grouped session days");
    run_days(config, &days, &compute_dataset_hash(bars))
}

/// Load an instrument's minute file from `data_dir` and run.
///
/// The config is validated before the file is read, so a bad config fails
/// without touching the disk.
pub fn run_from_dir(config: &StrategyConfig, data_dir: &Path) -> Result<RunResult, RunError> {
    validate_strategy(config)?;
    let loaded = load_minute_bars(data_dir, &config.index)?;
    run_bars(config, &loaded.bars)
}

/// Results of several runs and their combined daily net earnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedSummary {
    pub runs: Vec<RunResult>,
    /// Sum of `pnl_net_per_day` over the first run of each instrument.
    /// Later runs of an already-counted index are alternative calibrations
    /// and are reported but not summed.
    pub net_per_day: f64,
    pub net_per_month: f64,
}

impl CombinedSummary {
    pub fn from_runs(runs: Vec<RunResult>) -> Self {
        let mut counted = HashSet::new();
        let net_per_day: f64 = runs
            .iter()
            .filter(|run| counted.insert(run.index()))
            .filter_map(RunResult::net_per_day)
            .sum();
        Self {
            runs,
            net_per_day,
            net_per_month: net_per_day * TRADING_DAYS_PER_MONTH,
        }
    }
}

/// Run each configuration against `data_dir`, in order.
///
/// The first failing run aborts the batch.
pub fn run_all(configs: &[StrategyConfig], data_dir: &Path) -> Result<CombinedSummary, RunError> {
    let runs = configs
        .iter()
        .map(|config| run_from_dir(config, data_dir))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = CombinedSummary::from_runs(runs);
    info!(
        runs = summary.runs.len(),
        net_per_day = summary.net_per_day,
        "combined run complete"
    );
    Ok(summary)
}
