//! Error taxonomy for simulation and backtesting.
//!
//! Every failure is raised at the offending call, before any randomness is
//! consumed or any step is replayed. No partial series is ever returned.

use thiserror::Error;

/// Errors from simulators, signal generators, and the backtest engine.
#[derive(Debug, Clone, Error)]
pub enum SimError {
    /// A parameter failed validation before the run started.
    #[error("invalid parameter {name}: {reason} (got {value})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Price and signal series do not share the same index.
    #[error("misaligned series: price has {price_len} steps, signal has {signal_len}")]
    MisalignedSeries {
        price_len: usize,
        signal_len: usize,
    },
}

impl SimError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_the_parameter() {
        let err = SimError::invalid("theta", -0.5, "must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("theta"));
        assert!(msg.contains("must be > 0"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn misaligned_series_message_reports_both_lengths() {
        let err = SimError::MisalignedSeries {
            price_len: 100,
            signal_len: 99,
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("99"));
    }
}
