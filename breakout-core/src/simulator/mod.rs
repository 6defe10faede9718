//! Single-day breakout simulator.
//!
//! The first [`WARMUP_BARS`] bars of a day establish the breakout range. Within
//! the entry window that follows, the first bar to trade outside the range
//! opens a position in the breakout direction; the position is then held until
//! its stop or limit is reached, or marked to the last close of the day.
//!
//! See [`levels`] for the intrabar path assumption behind exit resolution and
//! the meaning of the uncertainty flag.

pub mod levels;
pub mod state;

pub use levels::{BreakoutRange, Entry, EntryKind, ExitEvent, ExitLevels};
pub use state::{DayContext, DayState, Position};

use crate::config::StrategyConfig;
use crate::domain::{TradingDay, TradeOutcome, WARMUP_BARS};
use crate::error::SimulationError;

/// Simulate one trading day.
///
/// Returns `Ok(None)` when no breakout occurs within the entry window. Errors
/// only if the day violates the caller contract: a full warm-up window and at
/// least one session bar.
pub fn simulate(
    config: &StrategyConfig,
    day: &TradingDay,
) -> Result<Option<TradeOutcome>, SimulationError> {
    if day.bars.len() < WARMUP_BARS {
        return Err(SimulationError::InsufficientWarmup {
            day: day.key,
            bars: day.bars.len(),
            required: WARMUP_BARS,
        });
    }
    let session = day.session();
    let Some(last) = session.last() else {
        return Err(SimulationError::EmptySession { day: day.key });
    };
    let Some(range) = BreakoutRange::from_warmup(day.warmup(), config.margin) else {
        return Err(SimulationError::InsufficientWarmup {
            day: day.key,
            bars: 0,
            required: WARMUP_BARS,
        });
    };

    let ctx = DayContext::new(day.key, range, config);
    let mut state = DayState::NotTriggered;
    for (index, bar) in session.iter().enumerate() {
        state = state.step(&ctx, index, bar);
        if state.is_terminal() {
            break;
        }
    }

    Ok(match state {
        DayState::Exited(outcome) => Some(outcome),
        DayState::InPosition(position) => Some(ctx.close_out(&position, last.close)),
        DayState::NotTriggered | DayState::WindowClosed => None,
    })
}
