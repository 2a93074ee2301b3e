//! Artifact export — CSV and JSON outputs for a scenario run.
//!
//! Artifacts per run:
//! - `prices.csv` — simulated path, with regime labels when present
//! - `equity.csv` — step-by-step equity curve
//! - `trades.csv` — the round-trip trade tape
//! - `metrics.json` — the full metrics block

use std::path::Path;

use anyhow::{Context, Result};
use simlab_core::domain::{EquityCurve, PriceSeries, RegimeSeries, TradeRecord};
use simlab_core::metrics::PerformanceMetrics;
use simlab_core::scenario::ScenarioResult;

/// Price path as CSV. With regime labels the series gains a `regime` column.
pub fn export_prices_csv(prices: &PriceSeries, regimes: Option<&RegimeSeries>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    match regimes {
        Some(regimes) => {
            wtr.write_record(["step", "price", "regime"])?;
            for (i, (&p, &r)) in prices.prices.iter().zip(regimes.regimes.iter()).enumerate() {
                wtr.write_record([&i.to_string(), &format!("{p:.6}"), &format!("{r:?}")])?;
            }
        }
        None => {
            wtr.write_record(["step", "price"])?;
            for (i, &p) in prices.prices.iter().enumerate() {
                wtr.write_record([&i.to_string(), &format!("{p:.6}")])?;
            }
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Equity curve as CSV with step and equity columns.
pub fn export_equity_csv(equity_curve: &EquityCurve) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["step", "equity"])?;
    for (i, eq) in equity_curve.equity.iter().enumerate() {
        wtr.write_record([&i.to_string(), &format!("{eq:.6}")])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Trade tape as CSV.
///
/// Columns: side, entry_step, entry_price, exit_step, exit_price,
/// steps_held, net_return, exit_kind
pub fn export_trades_csv(trades: &[TradeRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "side",
        "entry_step",
        "entry_price",
        "exit_step",
        "exit_price",
        "steps_held",
        "net_return",
        "exit_kind",
    ])?;
    for t in trades {
        wtr.write_record([
            &format!("{:?}", t.side),
            &t.entry_step.to_string(),
            &format!("{:.6}", t.entry_price),
            &t.exit_step.to_string(),
            &format!("{:.6}", t.exit_price),
            &t.steps_held().to_string(),
            &format!("{:.6}", t.net_return),
            &format!("{:?}", t.exit_kind),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Metrics block as pretty JSON.
pub fn export_metrics_json(metrics: &PerformanceMetrics) -> Result<String> {
    serde_json::to_string_pretty(metrics).context("failed to serialize metrics to JSON")
}

/// Save the full artifact set for one scenario run under `output_dir`.
pub fn save_artifacts(result: &ScenarioResult, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let prices_csv = export_prices_csv(&result.prices, result.regimes.as_ref())?;
    std::fs::write(output_dir.join("prices.csv"), &prices_csv)?;

    let equity_csv = export_equity_csv(&result.equity_curve)?;
    std::fs::write(output_dir.join("equity.csv"), &equity_csv)?;

    let trades_csv = export_trades_csv(&result.trades)?;
    std::fs::write(output_dir.join("trades.csv"), &trades_csv)?;

    let metrics_json = export_metrics_json(&result.metrics)?;
    std::fs::write(output_dir.join("metrics.json"), &metrics_json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simlab_core::domain::{ExitKind, Position, Regime};

    fn sample_trade() -> TradeRecord {
        TradeRecord {
            side: Position::Long,
            entry_step: 21,
            entry_price: 101.25,
            exit_step: 34,
            exit_price: 104.80,
            net_return: 0.0331,
            exit_kind: ExitKind::Signal,
        }
    }

    #[test]
    fn prices_csv_without_regimes() {
        let prices = PriceSeries::new(vec![100.0, 101.5]);
        let csv = export_prices_csv(&prices, None).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "step,price");
        assert!(lines[1].starts_with("0,100.000000"));
        assert!(lines[2].starts_with("1,101.500000"));
    }

    #[test]
    fn prices_csv_with_regimes() {
        let prices = PriceSeries::new(vec![100.0, 101.5]);
        let regimes = RegimeSeries {
            regimes: vec![Regime::Trending, Regime::MeanReverting],
        };
        let csv = export_prices_csv(&prices, Some(&regimes)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "step,price,regime");
        assert!(lines[1].ends_with("Trending"));
        assert!(lines[2].ends_with("MeanReverting"));
    }

    #[test]
    fn trades_csv_columns_and_content() {
        let csv = export_trades_csv(&[sample_trade()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "side,entry_step,entry_price,exit_step,exit_price,steps_held,net_return,exit_kind"
        );
        assert!(lines[1].contains("Long"));
        assert!(lines[1].contains("21"));
        assert!(lines[1].contains("13")); // steps_held
        assert!(lines[1].contains("Signal"));
    }

    #[test]
    fn empty_trades_header_only() {
        let csv = export_trades_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn equity_csv_rows() {
        let curve = EquityCurve {
            equity: vec![1.0, 1.01, 0.995],
        };
        let csv = export_equity_csv(&curve).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "step,equity");
        assert!(lines[2].starts_with("1,1.010000"));
    }

    #[test]
    fn save_artifacts_writes_all_files() {
        use simlab_core::engine::CostModel;
        use simlab_core::scenario::{run_scenario, ScenarioConfig};
        use simlab_core::signals::{Momentum, StrategyKind};
        use simlab_core::sims::{ProcessConfig, RegimeParams};

        let config = ScenarioConfig {
            process: ProcessConfig::RegimeSwitching(RegimeParams::default()),
            strategy: StrategyKind::Momentum(Momentum::default()),
            costs: CostModel::default(),
            horizon_steps: 120,
            dt: 1.0 / 252.0,
            seed: 42,
            periods_per_year: 252.0,
        };
        let result = run_scenario(&config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        save_artifacts(&result, dir.path()).unwrap();
        assert!(dir.path().join("prices.csv").exists());
        assert!(dir.path().join("equity.csv").exists());
        assert!(dir.path().join("trades.csv").exists());
        assert!(dir.path().join("metrics.json").exists());
    }
}
