//! Per-day state machine.
//!
//! `NotTriggered → InPosition → Exited`, or `NotTriggered → WindowClosed`
//! when the entry window passes without a breakout. Each transition is a
//! pure function of the current state and one bar.

use tracing::trace;

use crate::config::StrategyConfig;
use crate::domain::{DayKey, ExitReason, PriceBar, Side, TradeOutcome};

use super::levels::{BreakoutRange, EntryKind, ExitEvent, ExitLevels};

/// Fixed inputs of one day's simulation.
#[derive(Debug, Clone, Copy)]
pub struct DayContext {
    pub day: DayKey,
    pub range: BreakoutRange,
    pub half_spread: f64,
    pub stop: f64,
    pub limit: f64,
    pub trade_window: usize,
}

impl DayContext {
    pub fn new(day: DayKey, range: BreakoutRange, config: &StrategyConfig) -> Self {
        Self {
            day,
            range,
            half_spread: config.half_spread(),
            stop: config.stop,
            limit: config.limit,
            trade_window: config.trade_window,
        }
    }

    fn levels(&self, position: &Position) -> ExitLevels {
        ExitLevels::for_position(
            position.side,
            position.entry_price,
            self.half_spread,
            self.stop,
            self.limit,
        )
    }

    fn exit_outcome(&self, position: &Position, event: ExitEvent) -> TradeOutcome {
        let pnl = match event.reason {
            ExitReason::Limit => self.limit,
            ExitReason::Stop => -self.stop,
            ExitReason::Close => 0.0,
        };
        TradeOutcome {
            day: self.day,
            side: position.side,
            exit: event.reason,
            pnl,
            is_uncertain: event.is_uncertain,
        }
    }

    /// Mark an open position to `close`, paying the exit half-spread.
    pub fn close_out(&self, position: &Position, close: f64) -> TradeOutcome {
        let pnl = match position.side {
            Side::Long => close - position.entry_price - self.half_spread,
            Side::Short => position.entry_price - close - self.half_spread,
        };
        TradeOutcome {
            day: self.day,
            side: position.side,
            exit: ExitReason::Close,
            pnl,
            is_uncertain: false,
        }
    }
}

/// An open position. The entry price already includes the entry half-spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub side: Side,
    pub entry_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayState {
    NotTriggered,
    InPosition(Position),
    Exited(TradeOutcome),
    /// The entry window passed without a breakout.
    WindowClosed,
}

impl DayState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DayState::Exited(_) | DayState::WindowClosed)
    }

    /// Advance by one session bar. `index` counts bars after the warm-up window.
    pub fn step(self, ctx: &DayContext, index: usize, bar: &PriceBar) -> DayState {
        match self {
            DayState::Exited(_) | DayState::WindowClosed => self,
            DayState::InPosition(position) => match ctx.levels(&position).resolve_in_position(bar) {
                Some(event) => exit(ctx, &position, event, index),
                None => self,
            },
            DayState::NotTriggered => {
                if index >= ctx.trade_window {
                    trace!(day = %ctx.day, index, "entry window closed without breakout");
                    return DayState::WindowClosed;
                }
                let Some(entry) = ctx.range.detect_entry(bar, ctx.half_spread) else {
                    return DayState::NotTriggered;
                };
                let position = Position {
                    side: entry.side,
                    entry_price: entry.price,
                };
                trace!(
                    day = %ctx.day,
                    index,
                    side = ?position.side,
                    entry_price = position.entry_price,
                    kind = ?entry.kind,
                    "breakout entry"
                );

                let levels = ctx.levels(&position);
                let same_bar = match entry.kind {
                    EntryKind::Gap => levels.resolve_in_position(bar),
                    EntryKind::Intrabar => levels.resolve_after_breakout(bar),
                };
                match same_bar {
                    Some(event) => exit(ctx, &position, event, index),
                    None => DayState::InPosition(position),
                }
            }
        }
    }
}

fn exit(ctx: &DayContext, position: &Position, event: ExitEvent, index: usize) -> DayState {
    let outcome = ctx.exit_outcome(position, event);
    trace!(
        day = %ctx.day,
        index,
        exit = ?outcome.exit,
        pnl = outcome.pnl,
        uncertain = outcome.is_uncertain,
        "position exited"
    );
    DayState::Exited(outcome)
}
