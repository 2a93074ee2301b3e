//! Momentum signal — moving-average crossovers, edge-triggered.
//!
//! Entry on the golden cross: fast SMA crosses above slow SMA
//! (`fast[t-1] <= slow[t-1] && fast[t] > slow[t]`). Exit when the fast SMA
//! crosses below a shorter exit SMA. Crossings are detected on consecutive
//! steps, not by level comparison, so holding the crossed state for N steps
//! fires exactly one transition.

use serde::{Deserialize, Serialize};

use super::SignalGenerator;
use crate::domain::{Position, PriceSeries, SignalSeries};
use crate::error::{Result, SimError};
use crate::indicators::rolling_mean;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Momentum {
    /// Fast SMA window.
    pub fast_window: usize,
    /// Slow SMA window. Must exceed the fast window.
    pub slow_window: usize,
    /// Exit SMA window.
    pub exit_window: usize,
}

impl Default for Momentum {
    fn default() -> Self {
        Self {
            fast_window: 20,
            slow_window: 50,
            exit_window: 10,
        }
    }
}

impl Momentum {
    pub fn validate(&self) -> Result<()> {
        if self.fast_window < 1 {
            return Err(SimError::invalid(
                "fast_window",
                self.fast_window as f64,
                "must be >= 1",
            ));
        }
        if self.exit_window < 1 {
            return Err(SimError::invalid(
                "exit_window",
                self.exit_window as f64,
                "must be >= 1",
            ));
        }
        if self.slow_window <= self.fast_window {
            return Err(SimError::invalid(
                "slow_window",
                self.slow_window as f64,
                "must be > fast_window",
            ));
        }
        Ok(())
    }
}

fn crossed_above(fast_prev: f64, ref_prev: f64, fast_cur: f64, ref_cur: f64) -> bool {
    let finite =
        !(fast_prev.is_nan() || ref_prev.is_nan() || fast_cur.is_nan() || ref_cur.is_nan());
    finite && fast_prev <= ref_prev && fast_cur > ref_cur
}

fn crossed_below(fast_prev: f64, ref_prev: f64, fast_cur: f64, ref_cur: f64) -> bool {
    let finite =
        !(fast_prev.is_nan() || ref_prev.is_nan() || fast_cur.is_nan() || ref_cur.is_nan());
    finite && fast_prev >= ref_prev && fast_cur < ref_cur
}

impl SignalGenerator for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn warmup_steps(&self) -> usize {
        self.slow_window.saturating_sub(1)
    }

    fn produce_signal(&self, prices: &PriceSeries) -> SignalSeries {
        let fast = rolling_mean(&prices.prices, self.fast_window);
        let slow = rolling_mean(&prices.prices, self.slow_window);
        let exit = rolling_mean(&prices.prices, self.exit_window);

        let n = prices.len();
        let mut positions = Vec::with_capacity(n);
        let mut state = Position::Flat;

        for t in 0..n {
            if t > 0 {
                match state {
                    Position::Long => {
                        if crossed_below(fast[t - 1], exit[t - 1], fast[t], exit[t]) {
                            state = Position::Flat;
                        }
                    }
                    Position::Flat => {
                        if crossed_above(fast[t - 1], slow[t - 1], fast[t], slow[t]) {
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
