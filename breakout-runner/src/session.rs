//! Session window filtering and per-day grouping.
//!
//! Minute data arrives in a fixed time zone, while the instrument's cash
//! session opens one hour earlier in that zone once daylight saving starts.
//! The window kept per day is two hours wide: one warm-up hour before the open
//! and the first trading hour, both offset by `open_minute`.

use std::collections::BTreeMap;

use tracing::debug;

use breakout_core::domain::{DayKey, PriceBar, TradingDay, WARMUP_BARS};
use breakout_core::StrategyConfig;

/// The daylight-saving-aware session window of one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub dst_month_change: u32,
    pub dst_day_change: u32,
    pub non_dst_hour_trading_start: u32,
    pub open_minute: u32,
}

impl SessionWindow {
    pub fn from_config(config: &StrategyConfig) -> Self {
        Self {
            dst_month_change: config.dst_month_change,
            dst_day_change: config.dst_day_change,
            non_dst_hour_trading_start: config.non_dst_hour_trading_start,
            open_minute: config.open_minute,
        }
    }

    /// Opening hour for a calendar day: the standard-time hour before the
    /// daylight-saving change, one hour earlier from the change on.
    pub fn open_hour(&self, month: u32, day: u32) -> u32 {
        let before_change = month < self.dst_month_change
            || (month == self.dst_month_change && day < self.dst_day_change);
        if before_change {
            self.non_dst_hour_trading_start
        } else {
            self.non_dst_hour_trading_start.saturating_sub(1)
        }
    }

    pub fn contains(&self, bar: &PriceBar) -> bool {
        let open = self.open_hour(bar.month, bar.day);
        (open >= 1 && bar.hour == open - 1 && bar.minute >= self.open_minute)
            || bar.hour == open
            || (bar.hour == open + 1 && bar.minute < self.open_minute)
    }
}

/// Keep in-window bars, group them by day, and drop days too short to trade.
///
/// Bars keep their input order within a day. Days come back sorted by key.
pub fn group_days(bars: &[PriceBar], window: &SessionWindow, trade_window: usize) -> Vec<TradingDay> {
    let mut by_day: BTreeMap<DayKey, Vec<PriceBar>> = BTreeMap::new();
    for bar in bars.iter().filter(|b| window.contains(b)) {
        by_day.entry(DayKey::of(bar)).or_default().push(*bar);
    }

    by_day
        .into_iter()
        .map(|(key, bars)| TradingDay::new(key, bars))
        .filter(|day| {
            let keep = day.has_min_len(trade_window);
            if !keep {
                debug!(
                    day = %day.key,
                    bars = day.bars.len(),
                    min_len = WARMUP_BARS + trade_window,
                    "dropping short day"
                );
            }
            keep
        })
        .collect()
}
