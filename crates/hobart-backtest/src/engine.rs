//! Portfolio backtest engine.
//!
//! Converts prices of the selected symbols plus optional static weights into
//! a per-period portfolio return series and its cumulative growth curve.
//! Weights are fixed over the whole horizon (no rebalancing); with no weight
//! vector each symbol contributes 1/k of the portfolio return.

use hobart_data::PricePanel;
use hobart_portfolio::WeightVector;

use crate::error::{BacktestError, Result};
use crate::series::{CumulativeSeries, ReturnSeries};

/// Run a backtest over the selected symbols.
///
/// Daily percentage returns are computed per symbol (the first panel row has
/// no return). The portfolio return per period is the arithmetic mean across
/// symbols when `weights` is `None`, otherwise the dot product of the weight
/// vector with the period's returns. The cumulative series is the running
/// product of `(1 + return)`.
///
/// # Errors
///
/// * [`hobart_data::DataError::UnknownSymbol`] if a selected symbol is not in
///   the panel
/// * [`hobart_data::DataError::InsufficientHistory`] if the panel has fewer
///   than 2 rows
/// * [`BacktestError::MissingWeight`] if `weights` does not cover a symbol
pub fn run_backtest(
    panel: &PricePanel,
    selected: &[String],
    weights: Option<&WeightVector>,
) -> Result<(ReturnSeries, CumulativeSeries)> {
    let sub = panel.restrict(selected)?;
    let returns = sub.daily_returns()?;
    let periods = returns.nrows();
    let k = sub.num_symbols();

    let per_symbol_weights = match weights {
        Some(vector) => Some(
            sub.symbols()
                .iter()
                .map(|symbol| {
                    vector
                        .get(symbol)
                        .ok_or_else(|| BacktestError::MissingWeight {
                            symbol: symbol.clone(),
                        })
                })
                .collect::<Result<Vec<f64>>>()?,
        ),
        None => None,
    };

    let mut portfolio_returns = Vec::with_capacity(periods);
    for t in 0..periods {
        let value = match &per_symbol_weights {
            Some(w) => (0..k).map(|j| w[j] * returns[[t, j]]).sum(),
            None => (0..k).map(|j| returns[[t, j]]).sum::<f64>() / k as f64,
        };
        portfolio_returns.push(value);
    }

    let mut cumulative = Vec::with_capacity(periods);
    let mut growth = 1.0;
    for &r in &portfolio_returns {
        growth *= 1.0 + r;
        cumulative.push(growth);
    }

    let dates = sub.return_dates().to_vec();
    Ok((
        ReturnSeries::new(dates.clone(), portfolio_returns)?,
        CumulativeSeries::new(dates, cumulative)?,
    ))
}
