//! Strategy configuration: the immutable parameters of one instrument's run.

use serde::{Deserialize, Serialize};

/// Default entry window: post-warm-up bars during which a breakout may open a position.
pub const DEFAULT_TRADE_WINDOW: usize = 30;

/// Default buffer added outside the warm-up range before a breakout counts.
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Default share of gross per-day P&L retained after costs not modelled here.
pub const DEFAULT_NET_EARNINGS_FRACTION: f64 = 0.75;

/// Simulation and aggregation parameters for one instrument.
///
/// `spread`, `margin`, `limit` and `stop` are in instrument price units.
/// The DST fields and `open_minute` only drive the upstream session filter;
/// the simulator never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Instrument name; also the stem of the minute-bar file (`<index>.minute.csv`).
    pub index: String,
    /// Bid/ask cost. Half is charged on entry and half on exit.
    pub spread: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Take-profit distance from entry.
    pub limit: f64,
    /// Stop-loss distance from entry.
    pub stop: f64,
    /// Position size multiplier applied by the aggregator.
    pub stake: f64,
    #[serde(default = "default_trade_window")]
    pub trade_window: usize,
    #[serde(default = "default_net_earnings_fraction")]
    pub net_earnings_fraction: f64,
    /// Month in which daylight saving time starts.
    pub dst_month_change: u32,
    /// Day of `dst_month_change` from which daylight saving time applies.
    pub dst_day_change: u32,
    /// Session open hour (data time zone) outside daylight saving time.
    pub non_dst_hour_trading_start: u32,
    pub open_minute: u32,
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

fn default_trade_window() -> usize {
    DEFAULT_TRADE_WINDOW
}

fn default_net_earnings_fraction() -> f64 {
    DEFAULT_NET_EARNINGS_FRACTION
}

impl StrategyConfig {
    pub fn half_spread(&self) -> f64 {
        self.spread / 2.0
    }
}
