//! Domain types — the immutable, step-indexed series a run produces.
//!
//! Every series derived from one simulation run shares the same implicit
//! index 0..horizon. Components return new owned series; nothing is
//! mutated in place once returned.

pub mod series;
pub mod trade;

pub use series::{EquityCurve, Position, PriceSeries, Regime, RegimeSeries, SignalSeries};
pub use trade::{ExitKind, TradeRecord};
