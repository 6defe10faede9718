//! Result aggregation: per-day outcomes in, summary report out.
//!
//! Pure and deterministic: aggregating the same outcome sequence twice yields
//! bit-identical reports. Input must be in day order; the cumulative and
//! drawdown sequences follow it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use breakout_core::domain::{DayKey, TradeOutcome};
use breakout_core::StrategyConfig;

use crate::metrics::{cumulative_sum, drawdown_series, max_drawdown, round2, running_max};

/// One traded day in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    pub day: DayKey,
    /// P&L in price units, rounded to 2 decimals.
    pub pnl: f64,
    /// `'+'` for a certain exit, `'?'` for an uncertain one.
    pub qualifier: char,
}

/// P&L summed over the traded days of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthResult {
    pub month: u32,
    pub pnl: f64,
}

/// Ratios and money figures; only defined when at least one trade exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub percent_win: f64,
    pub percent_loss: f64,
    pub percent_trading_days: f64,
    pub max_drawdown: f64,
    /// Sum of rounded P&L times stake.
    pub pnl: f64,
    pub pnl_per_trade: f64,
    pub pnl_per_day: f64,
    pub pnl_net_per_day: f64,
}

/// Summary of one instrument's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub results: Vec<DayResult>,
    pub by_month: Vec<MonthResult>,
    pub cumulative: Vec<f64>,
    pub running_max: Vec<f64>,
    pub drawdowns: Vec<f64>,
    pub num_total: usize,
    pub num_positive: usize,
    pub num_negative: usize,
    pub num_total_days: usize,
    /// `None` when no day produced a trade.
    pub stats: Option<TradeStats>,
}

impl AggregateReport {
    pub fn has_trades(&self) -> bool {
        self.stats.is_some()
    }

    pub fn uncertain_count(&self) -> usize {
        self.results.iter().filter(|r| r.qualifier == '?').count()
    }
}

/// Aggregate day-ordered simulator outcomes.
///
/// `outcomes` holds one entry per simulated day, `None` for days without a
/// trade. `total_days` is the number of candidate days, the denominator of
/// the trading-day frequency.
pub fn aggregate(
    config: &StrategyConfig,
    outcomes: &[Option<TradeOutcome>],
    total_days: usize,
) -> AggregateReport {
    let results: Vec<DayResult> = outcomes
        .iter()
        .flatten()
        .map(|o| DayResult {
            day: o.day,
            pnl: round2(o.pnl),
            qualifier: o.qualifier(),
        })
        .collect();

    let num_total = results.len();
    let num_positive = results.iter().filter(|r| r.pnl > 0.0).count();
    let num_negative = results.iter().filter(|r| r.pnl < 0.0).count();

    let mut months: BTreeMap<u32, f64> = BTreeMap::new();
    for r in &results {
        *months.entry(r.day.month).or_insert(0.0) += r.pnl;
    }
    let by_month = months
        .into_iter()
        .map(|(month, pnl)| MonthResult {
            month,
            pnl: round2(pnl),
        })
        .collect();

    let pnls: Vec<f64> = results.iter().map(|r| r.pnl).collect();
    let cumulative = cumulative_sum(&pnls);
    let peaks = running_max(&cumulative);
    let drawdowns = drawdown_series(&cumulative, &peaks);

    let stats = max_drawdown(&drawdowns)
        .filter(|_| num_total > 0 && total_days > 0)
        .map(|max_drawdown| {
            let total = num_total as f64;
            let percent_trading_days = round2(total / total_days as f64);
            let pnl = pnls.iter().sum::<f64>() * config.stake;
            let pnl_per_trade = pnl / total;
            let pnl_per_day = pnl_per_trade * percent_trading_days;
            TradeStats {
                percent_win: round2(num_positive as f64 / total),
                percent_loss: round2(num_negative as f64 / total),
                percent_trading_days,
                max_drawdown,
                pnl,
                pnl_per_trade,
                pnl_per_day,
                pnl_net_per_day: pnl_per_day * config.net_earnings_fraction,
            }
        });

    AggregateReport {
        results,
        by_month,
        cumulative,
        running_max: peaks,
        drawdowns,
        num_total,
        num_positive,
        num_negative,
        num_total_days: total_days,
        stats,
    }
}
