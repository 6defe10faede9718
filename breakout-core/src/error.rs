//! Caller-contract violations raised by the simulator.

use thiserror::Error;

use crate::domain::DayKey;

/// A day that cannot be simulated at all.
///
/// These are precondition failures: the session filter upstream guarantees a
/// full warm-up window and at least one tradeable bar. Days without a breakout
/// are not errors; they simulate to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("day {day}: {bars} bars, warm-up window needs {required}")]
    InsufficientWarmup {
        day: DayKey,
        bars: usize,
        required: usize,
    },

    #[error("day {day}: no session bars after the warm-up window")]
    EmptySession { day: DayKey },
}
