//! TradeRecord — a completed round-trip trade.

use serde::{Deserialize, Serialize};

use super::series::Position;

/// Why a trade was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitKind {
    /// The strategy signaled the exit.
    Signal,
    /// The position was still open at the final step and was force-closed.
    EndOfSeries,
}

/// A complete round-trip trade record: entry fill → exit fill.
///
/// Steps refer to the fill steps (after the one-step execution lag), prices
/// are the slipped fill prices, and `net_return` is net of commission on
/// both sides. Immutable once the engine appends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: Position,
    pub entry_step: usize,
    pub entry_price: f64,
    pub exit_step: usize,
    pub exit_price: f64,
    /// Realized return net of costs, relative to equity before entry.
    pub net_return: f64,
    pub exit_kind: ExitKind,
}

impl TradeRecord {
    pub fn steps_held(&self) -> usize {
        self.exit_step - self.entry_step
    }

    pub fn is_winner(&self) -> bool {
        self.net_return > 0.0
    }
}
