//! Price levels: the warm-up breakout range and a position's exit levels.
//!
//! OHLC bars do not record the order in which the high and the low were
//! reached. Exit resolution therefore relies on a path assumption:
//!
//! - a rising bar (`close >= open`) travels open → low → high → close,
//! - a falling or flat bar travels open → high → low → close,
//! - after an intrabar breakout entry the breakout move continues to its
//!   extreme before reversing.
//!
//! This is a modelling assumption, not a fact about the data. When both exit
//! levels lie inside one bar the chosen exit depends on it, and the result is
//! flagged uncertain. An unflagged result only means a single level was
//! breached.

use crate::domain::{ExitReason, PriceBar, Side};

/// The pre-market band `[low, high]`, widened by the margin on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakoutRange {
    pub low: f64,
    pub high: f64,
}

impl BreakoutRange {
    /// Range over the warm-up bars: `min(low) - margin`, `max(high) + margin`.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_warmup(bars: &[PriceBar], margin: f64) -> Option<Self> {
        if bars.is_empty() {
            return None;
        }
        let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            low: low - margin,
            high: high + margin,
        })
    }

    /// Detect a breakout on `bar`, returning the entry it opens.
    ///
    /// A gap open beyond the range enters at the open. Otherwise the extreme
    /// the bar is assumed to reach first is checked first: the low on a
    /// rising bar, the high on a falling or flat bar.
    pub fn detect_entry(&self, bar: &PriceBar, half_spread: f64) -> Option<Entry> {
        if bar.open >= self.high {
            return Some(Entry::gap(Side::Long, bar.open + half_spread));
        }
        if bar.open <= self.low {
            return Some(Entry::gap(Side::Short, bar.open - half_spread));
        }

        let broke_low = bar.low <= self.low;
        let broke_high = bar.high >= self.high;
        let short = || Entry::intrabar(Side::Short, self.low - half_spread);
        let long = || Entry::intrabar(Side::Long, self.high + half_spread);

        if bar.is_rising() {
            if broke_low {
                Some(short())
            } else if broke_high {
                Some(long())
            } else {
                None
            }
        } else if broke_high {
            Some(long())
        } else if broke_low {
            Some(short())
        } else {
            None
        }
    }
}

/// How the entry price was reached within its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The bar opened beyond the range; the whole bar follows the entry.
    Gap,
    /// The range was crossed inside the bar.
    Intrabar,
}

/// A position opened by a breakout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub side: Side,
    /// Fill price including the half-spread paid on entry.
    pub price: f64,
    pub kind: EntryKind,
}

impl Entry {
    fn gap(side: Side, price: f64) -> Self {
        Self {
            side,
            price,
            kind: EntryKind::Gap,
        }
    }

    fn intrabar(side: Side, price: f64) -> Self {
        Self {
            side,
            price,
            kind: EntryKind::Intrabar,
        }
    }
}

/// An exit found inside one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitEvent {
    pub reason: ExitReason,
    pub is_uncertain: bool,
}

/// Absolute stop and limit prices for an open position.
///
/// Bar prices are mid prices, so each level sits one half-spread further out
/// than the raw distance: a long exits on the bid, a short on the ask. That
/// makes a limit exit worth exactly `+limit` and a stop exit exactly `-stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitLevels {
    pub side: Side,
    pub stop: f64,
    pub limit: f64,
}

impl ExitLevels {
    pub fn for_position(side: Side, entry_price: f64, half_spread: f64, stop: f64, limit: f64) -> Self {
        match side {
            Side::Long => Self {
                side,
                stop: entry_price - stop + half_spread,
                limit: entry_price + limit + half_spread,
            },
            Side::Short => Self {
                side,
                stop: entry_price + stop - half_spread,
                limit: entry_price - limit - half_spread,
            },
        }
    }

    fn stop_hit(&self, bar: &PriceBar) -> bool {
        match self.side {
            Side::Long => bar.low <= self.stop,
            Side::Short => bar.high >= self.stop,
        }
    }

    fn limit_hit(&self, bar: &PriceBar) -> bool {
        match self.side {
            Side::Long => bar.high >= self.limit,
            Side::Short => bar.low <= self.limit,
        }
    }

    /// (lower-level reason, upper-level reason) for this side.
    fn lower_upper(&self) -> (ExitReason, ExitReason) {
        match self.side {
            Side::Long => (ExitReason::Stop, ExitReason::Limit),
            Side::Short => (ExitReason::Limit, ExitReason::Stop),
        }
    }

    fn hit(&self, bar: &PriceBar, reason: ExitReason) -> bool {
        match reason {
            ExitReason::Stop => self.stop_hit(bar),
            ExitReason::Limit => self.limit_hit(bar),
            ExitReason::Close => false,
        }
    }

    /// Resolve a bar for a position held since before the bar opened.
    ///
    /// A rising bar checks the lower level first, a falling or flat bar the
    /// upper level. If both are breached the first-checked one wins and the
    /// exit is uncertain.
    pub fn resolve_in_position(&self, bar: &PriceBar) -> Option<ExitEvent> {
        let (lower, upper) = self.lower_upper();
        let (first, second) = if bar.is_rising() {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Self::resolve_ordered(self.hit(bar, first), self.hit(bar, second), first, second)
    }

    /// Resolve the rest of the bar in which an intrabar breakout opened the position.
    ///
    /// The breakout move is assumed to continue to the bar's extreme on the
    /// breakout side, so the limit is checked before the stop. A stop breach
    /// alone is still taken as a stop.
    pub fn resolve_after_breakout(&self, bar: &PriceBar) -> Option<ExitEvent> {
        Self::resolve_ordered(
            self.limit_hit(bar),
            self.stop_hit(bar),
            ExitReason::Limit,
            ExitReason::Stop,
        )
    }

    fn resolve_ordered(
        first_hit: bool,
        second_hit: bool,
        first: ExitReason,
        second: ExitReason,
    ) -> Option<ExitEvent> {
        match (first_hit, second_hit) {
            (true, both) => Some(ExitEvent {
                reason: first,
                is_uncertain: both,
            }),
            (false, true) => Some(ExitEvent {
                reason: second,
                is_uncertain: false,
            }),
            (false, false) => None,
        }
    }
}
