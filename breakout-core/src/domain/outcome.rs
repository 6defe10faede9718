//! Trade outcome of a simulated day.

use serde::{Deserialize, Serialize};

use super::DayKey;

/// Direction of the breakout position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

/// How the position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitReason {
    /// Stop-loss level reached; P&L is `-stop`.
    Stop,
    /// Take-profit level reached; P&L is `+limit`.
    Limit,
    /// Still open after the last bar; marked to the last close.
    Close,
}

/// Result of a day that produced a trade. A day without a trade is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub day: DayKey,
    pub side: Side,
    pub exit: ExitReason,
    /// Price units, before stake multiplication.
    pub pnl: f64,
    /// Both exit levels were breached inside the bar that produced the exit,
    /// so the reported exit depends on the assumed intrabar path.
    pub is_uncertain: bool,
}

impl TradeOutcome {
    /// Report qualifier: `'?'` for uncertain exits, `'+'` otherwise.
    pub fn qualifier(&self) -> char {
        if self.is_uncertain {
            '?'
        } else {
            '+'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifier_marks_uncertain() {
        let mut outcome = TradeOutcome {
            day: DayKey::new(4, 2),
            side: Side::Long,
            exit: ExitReason::Limit,
            pnl: 6.0,
            is_uncertain: false,
        };
        assert_eq!(outcome.qualifier(), '+');
        outcome.is_uncertain = true;
        assert_eq!(outcome.qualifier(), '?');
    }

    #[test]
    fn outcome_serializes_lowercase_enums() {
        let outcome = TradeOutcome {
            day: DayKey::new(4, 2),
            side: Side::Short,
            exit: ExitReason::Stop,
            pnl: -9.0,
            is_uncertain: false,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"short\""));
        assert!(json.contains("\"stop\""));
    }
}
