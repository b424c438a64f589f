//! End-to-end strategy pipeline.
//!
//! Wires the five stages together: factor computation, cross-sectional
//! scoring, selection, weighting, and backtest. Every stage is a pure
//! transformation of the previous stage's output; the pipeline holds no
//! state between runs, so independent runs over different universes or
//! parameter sets may execute in parallel without coordination.

use hobart_backtest::{BacktestError, CumulativeSeries, PerformanceSummary, ReturnSeries, run_backtest};
use hobart_data::{MarketCapSeries, PricePanel};
use hobart_factors::{
    FactorConfig, FactorError, FactorTable, FactorWeights, ScoreSeries, compute_factors,
    compute_score, select_top,
};
use hobart_portfolio::{
    WeightVector, WeightingError, WeightingMethod, compute_optimal_weights,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the end-to-end pipeline.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Factor computation or scoring failed
    #[error(transparent)]
    Factor(#[from] FactorError),

    /// Mean-variance weighting failed
    ///
    /// A singular covariance is surfaced as-is; there is no automatic
    /// fallback to equal weight.
    #[error(transparent)]
    Weighting(#[from] WeightingError),

    /// Backtest failed
    #[error(transparent)]
    Backtest(#[from] BacktestError),

    /// Selection size must be at least 1
    #[error("Selection size must be at least 1")]
    InvalidSelectionSize,
}

/// Parameters of a strategy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Strategy name, used in the performance summary.
    pub name: String,

    /// Momentum and volatility lookbacks.
    pub factor_config: FactorConfig,

    /// Relative factor importances (normalized at construction).
    pub factor_weights: FactorWeights,

    /// Number of securities to select (must be >= 1).
    pub selection_size: usize,

    /// Equal-weight or maximum-Sharpe weighting.
    pub weighting_method: WeightingMethod,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: "Factor Strategy".to_string(),
            factor_config: FactorConfig::default(),
            factor_weights: FactorWeights::default(),
            selection_size: 10,
            weighting_method: WeightingMethod::default(),
        }
    }
}

/// Everything a strategy run produces, stage by stage.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    /// Raw factor values per symbol.
    pub factor_table: FactorTable,

    /// Composite scores, best first.
    pub scores: ScoreSeries,

    /// Selected symbols, best first.
    pub selected: Vec<String>,

    /// Materialized weights; `None` in equal-weight mode.
    pub weights: Option<WeightVector>,

    /// Per-period portfolio returns.
    pub returns: ReturnSeries,

    /// Cumulative growth curve.
    pub cumulative: CumulativeSeries,

    /// Summary statistics over the backtest horizon.
    pub summary: PerformanceSummary,
}

/// Run the full pipeline over a price panel and market-cap series.
///
/// # Errors
///
/// * [`StrategyError::InvalidSelectionSize`] if `selection_size` is 0
/// * [`StrategyError::Factor`] on factor/scoring failures (empty or too-short
///   history, uncovered symbols)
/// * [`StrategyError::Weighting`] if the covariance matrix is singular in
///   max-Sharpe mode
/// * [`StrategyError::Backtest`] on backtest failures
pub fn run_strategy(
    panel: &PricePanel,
    caps: &MarketCapSeries,
    config: &StrategyConfig,
) -> Result<StrategyReport, StrategyError> {
    if config.selection_size == 0 {
        return Err(StrategyError::InvalidSelectionSize);
    }

    let factor_table = compute_factors(panel, caps, &config.factor_config)?;
    let scores = compute_score(&factor_table, &config.factor_weights)?;
    let selected = select_top(&scores, config.selection_size);

    let weights = match config.weighting_method {
        WeightingMethod::EqualWeight => None,
        WeightingMethod::MaxSharpe => Some(compute_optimal_weights(panel, &selected)?),
    };

    let (returns, cumulative) = run_backtest(panel, &selected, weights.as_ref())?;
    let summary = PerformanceSummary::from_backtest(&config.name, &returns, &cumulative)?;

    Ok(StrategyReport {
        factor_table,
        scores,
        selected,
        weights,
        returns,
        cumulative,
        summary,
    })
}
