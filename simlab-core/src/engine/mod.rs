//! Backtest engine — step-by-step replay of a signal series against its
//! price series.
//!
//! The engine converts signal transitions into simulated fills (with a
//! one-step execution lag), applies the cost model per side, and derives an
//! equity curve plus a closed set of trade records.

pub mod backtest;
pub mod cost_model;

pub use backtest::{run_backtest, RunResult};
pub use cost_model::CostModel;
