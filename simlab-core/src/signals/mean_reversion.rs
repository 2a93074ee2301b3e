//! Mean-reversion signal — z-score bands over a rolling window.
//!
//! Entry while Flat: |z| > entry_z. Exit while Long: |z| > stop_z
//! (stop-loss) or |z| < exit_z (profit-take). Exits are evaluated before
//! entries each step, so a stop-out never re-enters on the same step.
//! Steps where z is undefined (incomplete window, zero rolling std) leave
//! the current position unchanged; during warmup that means Flat.

use serde::{Deserialize, Serialize};

use super::SignalGenerator;
use crate::domain::{Position, PriceSeries, SignalSeries};
use crate::error::{Result, SimError};
use crate::indicators::z_score;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanReversion {
    /// Rolling lookback for mean and standard deviation.
    pub window: usize,
    /// Entry band: go Long when |z| exceeds this.
    pub entry_z: f64,
    /// Profit-take band: exit when |z| falls inside this.
    pub exit_z: f64,
    /// Stop-loss band: exit when |z| exceeds this.
    pub stop_z: f64,
}

impl Default for MeanReversion {
    fn default() -> Self {
        Self {
            window: 20,
            entry_z: 2.0,
            exit_z: 0.5,
            stop_z: 3.0,
        }
    }
}

impl MeanReversion {
    pub fn validate(&self) -> Result<()> {
        if self.window < 2 {
            return Err(SimError::invalid(
                "window",
                self.window as f64,
                "must be >= 2",
            ));
        }
        if !(self.exit_z > 0.0) {
            return Err(SimError::invalid("exit_z", self.exit_z, "must be > 0"));
        }
        if !(self.entry_z > self.exit_z) {
            return Err(SimError::invalid(
                "entry_z",
                self.entry_z,
                "must be > exit_z",
            ));
        }
        if !(self.stop_z > self.entry_z) {
            return Err(SimError::invalid(
                "stop_z",
                self.stop_z,
                "must be > entry_z",
            ));
        }
        Ok(())
    }
}

impl SignalGenerator for MeanReversion {
    fn name(&self) -> &str {
        "mean-reversion"
    }

    fn warmup_steps(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn produce_signal(&self, prices: &PriceSeries) -> SignalSeries {
        let z = z_score(&prices.prices, self.window);
        let mut positions = Vec::with_capacity(prices.len());
        let mut state = Position::Flat;

        for &zt in &z {
            if !zt.is_nan() {
                match state {
                    // Exit conditions first: stop-loss, then profit-take.
                    Position::Long => {
                        if zt.abs() > self.stop_z || zt.abs() < self.exit_z {
                            state = Position::Flat;
                        }
                    }
                    Position::Flat => {
                        if zt.abs() > self.entry_z {
                            state = Position::Long;
                        }
                    }
                }
            }
            positions.push(state);
        }

        SignalSeries::new(positions)
    }
}
