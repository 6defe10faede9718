//! Named instrument presets.
//!
//! Calibrations for the two index CFDs the backtester was built around. All
//! times are in the data's UTC wall clock: DAX opens 08:00 before its DST
//! change, the Dow 14:30.

use breakout_core::config::{DEFAULT_MARGIN, DEFAULT_NET_EARNINGS_FRACTION, DEFAULT_TRADE_WINDOW};
use breakout_core::StrategyConfig;

/// Preset names accepted by [`by_name`], in `all` run order.
pub const PRESET_NAMES: [&str; 3] = ["dax", "dji", "dji-wide"];

/// DAX: tight limit, wide stop, large stake.
pub fn dax() -> StrategyConfig {
    StrategyConfig {
        index: "DAX".into(),
        spread: 0.9,
        margin: DEFAULT_MARGIN,
        limit: 6.0,
        stop: 9.0,
        stake: 100.0,
        trade_window: DEFAULT_TRADE_WINDOW,
        net_earnings_fraction: DEFAULT_NET_EARNINGS_FRACTION,
        dst_month_change: 3,
        dst_day_change: 26,
        non_dst_hour_trading_start: 8,
        open_minute: 0,
    }
}

/// Dow Jones: symmetric 9-point limit and stop.
pub fn dji() -> StrategyConfig {
    StrategyConfig {
        index: "DJI".into(),
        spread: 1.5,
        margin: DEFAULT_MARGIN,
        limit: 9.0,
        stop: 9.0,
        stake: 50.0,
        trade_window: DEFAULT_TRADE_WINDOW,
        net_earnings_fraction: DEFAULT_NET_EARNINGS_FRACTION,
        dst_month_change: 3,
        dst_day_change: 12,
        non_dst_hour_trading_start: 14,
        open_minute: 30,
    }
}

/// Dow Jones with a 30-point limit and a small stake.
pub fn dji_wide() -> StrategyConfig {
    StrategyConfig {
        limit: 30.0,
        stake: 10.0,
        ..dji()
    }
}

pub fn by_name(name: &str) -> Option<StrategyConfig> {
    match name.to_ascii_lowercase().as_str() {
        "dax" => Some(dax()),
        "dji" => Some(dji()),
        "dji-wide" | "dji_wide" => Some(dji_wide()),
        _ => None,
    }
}

/// All presets in [`PRESET_NAMES`] order.
pub fn all() -> Vec<StrategyConfig> {
    vec![dax(), dji(), dji_wide()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate_strategy;

    #[test]
    fn every_name_resolves() {
        for name in PRESET_NAMES {
            assert!(by_name(name).is_some(), "{name}");
        }
        assert_eq!(by_name("DAX"), Some(dax()));
        assert!(by_name("ftse").is_none());
    }

    #[test]
    fn presets_are_valid() {
        for preset in all() {
            validate_strategy(&preset).unwrap();
        }
    }

    #[test]
    fn dji_wide_differs_only_in_limit_and_stake() {
        let wide = dji_wide();
        let base = dji();
        assert_eq!(wide.limit, 30.0);
        assert_eq!(wide.stake, 10.0);
        assert_eq!(wide.spread, base.spread);
        assert_eq!(wide.open_minute, base.open_minute);
    }
}
