//! Step-indexed series types shared across the pipeline.
//!
//! The time index is implicit: element `i` of every series belongs to step
//! `i`, and all series from one run have length equal to the configured
//! horizon. Alignment between price and signal series is checked by the
//! engine before replay.

use serde::{Deserialize, Serialize};

/// Desired exposure at a step. A decision, not yet a fill.
///
/// `Short` is not modeled; the enum leaves room for it without touching
/// the engine's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long,
}

/// Latent market state of the regime-switching generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    Trending,
    MeanReverting,
}

impl Regime {
    pub fn flip(self) -> Self {
        match self {
            Regime::Trending => Regime::MeanReverting,
            Regime::MeanReverting => Regime::Trending,
        }
    }
}

/// Simulated close prices, one per step. Strictly positive by construction
/// (both diffusions evolve the log price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Regime label per step, aligned 1:1 with the price series it annotates.
///
/// Post-hoc diagnostic only: strategies never see this (they must be
/// regime-agnostic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeSeries {
    pub regimes: Vec<Regime>,
}

impl RegimeSeries {
    pub fn len(&self) -> usize {
        self.regimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regimes.is_empty()
    }

    /// Fraction of steps spent in the given regime.
    pub fn occupancy(&self, regime: Regime) -> f64 {
        if self.regimes.is_empty() {
            return 0.0;
        }
        let count = self.regimes.iter().filter(|&&r| r == regime).count();
        count as f64 / self.regimes.len() as f64
    }
}

/// Desired position per step, aligned 1:1 with its source price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSeries {
    pub positions: Vec<Position>,
}

impl SignalSeries {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of Flat→Long transitions in the series.
    pub fn entry_count(&self) -> usize {
        self.positions
            .windows(2)
            .filter(|w| w[0] == Position::Flat && w[1] == Position::Long)
            .count()
    }
}

/// Portfolio value per step, starting at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    pub equity: Vec<f64>,
}

impl EquityCurve {
    pub const BASE: f64 = 1.0;

    pub fn len(&self) -> usize {
        self.equity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equity.is_empty()
    }

    pub fn final_equity(&self) -> f64 {
        self.equity.last().copied().unwrap_or(Self::BASE)
    }

    /// Per-step simple returns: `equity[t] / equity[t-1] - 1`.
    pub fn step_returns(&self) -> Vec<f64> {
        self.equity
            .windows(2)
            .map(|w| w[1] / w[0] - 1.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_flip_is_involution() {
        assert_eq!(Regime::Trending.flip(), Regime::MeanReverting);
        assert_eq!(Regime::Trending.flip().flip(), Regime::Trending);
    }

    #[test]
    fn occupancy_sums_to_one() {
        let series = RegimeSeries {
            regimes: vec![
                Regime::Trending,
                Regime::Trending,
                Regime::MeanReverting,
                Regime::Trending,
            ],
        };
        let t = series.occupancy(Regime::Trending);
        let m = series.occupancy(Regime::MeanReverting);
        assert!((t - 0.75).abs() < 1e-12);
        assert!((t + m - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entry_count_counts_flat_to_long_edges() {
        use Position::*;
        let series = SignalSeries::new(vec![Flat, Long, Long, Flat, Long, Flat]);
        assert_eq!(series.entry_count(), 2);
    }

    #[test]
    fn step_returns_length_is_len_minus_one() {
        let curve = EquityCurve {
            equity: vec![1.0, 1.1, 1.045],
        };
        let returns = curve.step_returns();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] - (1.045 / 1.1 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn signal_series_serialization_roundtrip() {
        let series = SignalSeries::new(vec![Position::Flat, Position::Long]);
        let json = serde_json::to_string(&series).unwrap();
        let deser: SignalSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(series, deser);
    }
}
