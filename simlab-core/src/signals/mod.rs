//! Signal generators — strategies as pure functions of price history.
//!
//! A generator consumes a price series and emits the desired position at
//! every step. Generators keep no memory beyond what is recomputable from
//! the series, so replay is deterministic and the backtest engine stays
//! ignorant of which strategy produced its input.

pub mod mean_reversion;
pub mod momentum;

pub use mean_reversion::MeanReversion;
pub use momentum::Momentum;

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalSeries};
use crate::error::Result;

/// A rules-based trading strategy.
pub trait SignalGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Steps before the generator can hold an opinion (Flat until then).
    fn warmup_steps(&self) -> usize;

    /// Produce the desired position at every step of `prices`.
    ///
    /// The output is aligned 1:1 with the input; positions are decisions,
    /// not fills (the engine applies the execution lag).
    fn produce_signal(&self, prices: &PriceSeries) -> SignalSeries;
}

/// Strategy selector for config files and the batch runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyKind {
    MeanReversion(MeanReversion),
    Momentum(Momentum),
}

impl StrategyKind {
    /// Validate the parameter set and build the generator.
    pub fn build(&self) -> Result<Box<dyn SignalGenerator>> {
        match self {
            Self::MeanReversion(params) => {
                params.validate()?;
                Ok(Box::new(params.clone()))
            }
            Self::Momentum(params) => {
                params.validate()?;
                Ok(Box::new(params.clone()))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MeanReversion(_) => "mean-reversion",
            Self::Momentum(_) => "momentum",
        }
    }
}
