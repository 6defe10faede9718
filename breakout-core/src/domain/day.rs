//! Trading day: a day key plus its ordered session bars.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PriceBar;

/// Number of leading bars used only to establish the breakout range.
pub const WARMUP_BARS: usize = 60;

/// Calendar key of a trading day, rendered as `"<month>-<day>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn of(bar: &PriceBar) -> Self {
        Self::new(bar.month, bar.day)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month, self.day)
    }
}

/// One session's bars: [`WARMUP_BARS`] warm-up bars followed by the tradeable session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingDay {
    pub key: DayKey,
    pub bars: Vec<PriceBar>,
}

impl TradingDay {
    pub fn new(key: DayKey, bars: Vec<PriceBar>) -> Self {
        Self { key, bars }
    }

    /// The range-establishing bars (may be shorter than [`WARMUP_BARS`] for malformed days).
    pub fn warmup(&self) -> &[PriceBar] {
        &self.bars[..self.bars.len().min(WARMUP_BARS)]
    }

    /// The bars after the warm-up window.
    pub fn session(&self) -> &[PriceBar] {
        self.bars.get(WARMUP_BARS..).unwrap_or(&[])
    }

    /// Whether the day is long enough to be simulated with the given entry window.
    pub fn has_min_len(&self, trade_window: usize) -> bool {
        self.bars.len() >= WARMUP_BARS + trade_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(minute: u32) -> PriceBar {
        PriceBar {
            month: 1,
            day: 4,
            hour: 8,
            minute,
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.5,
        }
    }

    #[test]
    fn day_key_renders_month_dash_day() {
        assert_eq!(DayKey::new(3, 12).to_string(), "3-12");
    }

    #[test]
    fn day_keys_order_by_month_then_day() {
        let mut keys = vec![DayKey::new(10, 1), DayKey::new(2, 28), DayKey::new(2, 3)];
        keys.sort();
        assert_eq!(
            keys,
            vec![DayKey::new(2, 3), DayKey::new(2, 28), DayKey::new(10, 1)]
        );
    }

    #[test]
    fn warmup_and_session_split_at_sixty() {
        let bars: Vec<_> = (0..65).map(|i| bar(i % 60)).collect();
        let day = TradingDay::new(DayKey::new(1, 4), bars);
        assert_eq!(day.warmup().len(), 60);
        assert_eq!(day.session().len(), 5);
        assert!(day.has_min_len(5));
        assert!(!day.has_min_len(6));
    }

    #[test]
    fn short_day_has_empty_session() {
        let day = TradingDay::new(DayKey::new(1, 4), (0..10).map(bar).collect());
        assert_eq!(day.warmup().len(), 10);
        assert!(day.session().is_empty());
    }
}
