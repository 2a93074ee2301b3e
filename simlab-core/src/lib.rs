//! SimLab Core — synthetic path simulation and rules-based backtesting.
//!
//! The pipeline flows strictly downstream:
//! - Path simulators (trending, mean-reverting, regime-switching diffusions)
//! - Signal generators (z-score mean reversion, MA-crossover momentum)
//! - Backtest engine (execution lag, cost model, equity accounting)
//! - Performance metrics (Sharpe, Calmar, drawdown, trade statistics)
//!
//! Every run is a pure function from (parameters, seed) to (series,
//! metrics): components return new immutable series, no component retains
//! cross-run state, and batches of runs parallelize with zero coordination.

pub mod batch;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod rng;
pub mod scenario;
pub mod signals;
pub mod sims;

pub use error::{Result, SimError};
