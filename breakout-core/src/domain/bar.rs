//! PriceBar: one minute of trading.

use serde::{Deserialize, Serialize};

/// One minute OHLC summary for a single instrument.
///
/// Prices are mid prices in instrument units. The bar carries only the
/// month/day/hour/minute of its timestamp; the year is not needed by the
/// session filter or the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    /// True when the bar closed at or above its open.
    ///
    /// The simulator assumes a rising bar reached its low before its high,
    /// and a falling or flat bar reached its high before its low.
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }

    /// Basic OHLC sanity check: high >= low and open/close inside the range.
    pub fn is_sane(&self) -> bool {
        if [self.open, self.high, self.low, self.close]
            .iter()
            .any(|p| !p.is_finite())
        {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.low > 0.0
    }
}
