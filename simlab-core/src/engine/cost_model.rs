//! Cost model — commission and slippage per side.
//!
//! Slippage is directional: entries fill above the observed price, exits
//! fill below it. Commission is a symmetric fraction of trade notional,
//! charged independently on each side.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Execution friction for one run. Rates are fractions of notional
/// (0.001 = 10 bps). Zero-cost is a valid configuration for idealized
/// comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Commission per side, as a fraction of notional.
    pub cost_rate: f64,
    /// Slippage per side, as a fraction of price.
    pub slippage_rate: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            cost_rate: 0.001,
            slippage_rate: 0.0005,
        }
    }
}

impl CostModel {
    pub fn new(cost_rate: f64, slippage_rate: f64) -> Self {
        Self {
            cost_rate,
            slippage_rate,
        }
    }

    pub fn frictionless() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cost_rate >= 0.0) {
            return Err(SimError::invalid(
                "cost_rate",
                self.cost_rate,
                "must be >= 0",
            ));
        }
        if !(self.slippage_rate >= 0.0) {
            return Err(SimError::invalid(
                "slippage_rate",
                self.slippage_rate,
                "must be >= 0",
            ));
        }
        Ok(())
    }

    /// Fill price for an entry: buyers pay up.
    pub fn entry_fill(&self, raw_price: f64) -> f64 {
        raw_price * (1.0 + self.slippage_rate)
    }

    /// Fill price for an exit: sellers receive less.
    pub fn exit_fill(&self, raw_price: f64) -> f64 {
        raw_price * (1.0 - self.slippage_rate)
    }

    /// Equity multiplier for one side's commission.
    pub fn commission_factor(&self) -> f64 {
        1.0 - self.cost_rate
    }
}
