//! Factor table assembly.
//!
//! Runs every factor over the price panel and collects the raw values into a
//! single polars [`DataFrame`] with one row per symbol, indexed identically to
//! the panel's column axis.

use hobart_data::{MarketCapSeries, PricePanel};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FactorError, Result};
use crate::momentum::{MomentumConfig, MomentumFactor};
use crate::size::SizeFactor;
use crate::volatility::{VolatilityConfig, VolatilityFactor};

/// Symbol column name in the factor table.
pub const SYMBOL_COL: &str = "symbol";
/// Momentum column name in the factor table.
pub const MOMENTUM_COL: &str = "momentum";
/// Volatility column name in the factor table.
pub const VOLATILITY_COL: &str = "volatility";
/// Size column name in the factor table.
pub const SIZE_COL: &str = "size";

/// Lookback configuration for the factor engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorConfig {
    /// Momentum lookback in trading days (default: 252)
    pub momentum_lookback_days: usize,
    /// Volatility trailing window in trading days (default: 252)
    pub volatility_window_days: usize,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            momentum_lookback_days: 252,
            volatility_window_days: 252,
        }
    }
}

/// Per-symbol factor values: momentum, volatility, and raw market cap.
#[derive(Debug, Clone)]
pub struct FactorTable {
    df: DataFrame,
}

impl FactorTable {
    /// Wrap an externally assembled factor dataframe.
    ///
    /// Useful for callers that compute factor values themselves; the frame
    /// must carry the `symbol`, `momentum`, `volatility`, and `size` columns.
    ///
    /// # Errors
    ///
    /// [`FactorError::EmptyTable`] if the frame has no rows, or
    /// [`FactorError::Computation`] if a required column is missing.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        for name in [SYMBOL_COL, MOMENTUM_COL, VOLATILITY_COL, SIZE_COL] {
            df.column(name)?;
        }
        if df.height() == 0 {
            return Err(FactorError::EmptyTable);
        }
        Ok(Self { df })
    }

    /// The underlying dataframe (columns: symbol, momentum, volatility, size).
    pub const fn df(&self) -> &DataFrame {
        &self.df
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Symbols in table (and panel column) order.
    ///
    /// # Errors
    ///
    /// [`FactorError::Computation`] if the symbol column cannot be read.
    pub fn symbols(&self) -> Result<Vec<String>> {
        let column = self.df.column(SYMBOL_COL)?.str()?;
        Ok(column
            .into_iter()
            .map(|s| s.unwrap_or_default().to_string())
            .collect())
    }

    /// Values of one factor column, in symbol order.
    ///
    /// # Errors
    ///
    /// [`FactorError::Computation`] if the column is absent or not `f64`.
    pub fn factor_values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.df.column(name)?.f64()?;
        Ok(column
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }
}

/// Compute all factors for the panel's symbols.
///
/// `size` holds the raw market capitalization; its log transform is applied
/// only inside scoring.
///
/// # Errors
///
/// * [`hobart_data::DataError::InsufficientHistory`] if the panel has fewer
///   than 2 rows (no return computable)
/// * [`hobart_data::DataError::MissingMarketCap`] if the market-cap series
///   does not cover every panel symbol
pub fn compute_factors(
    panel: &PricePanel,
    caps: &MarketCapSeries,
    config: &FactorConfig,
) -> Result<FactorTable> {
    let momentum = MomentumFactor::with_config(MomentumConfig {
        lookback_days: config.momentum_lookback_days,
    })
    .compute(panel)?;
    let volatility = VolatilityFactor::with_config(VolatilityConfig {
        window_days: config.volatility_window_days,
    })
    .compute(panel)?;
    let size = SizeFactor.compute(panel, caps)?;

    let df = df!(
        SYMBOL_COL => panel.symbols().to_vec(),
        MOMENTUM_COL => momentum,
        VOLATILITY_COL => volatility,
        SIZE_COL => size,
    )?;

    if df.height() == 0 {
        return Err(FactorError::EmptyTable);
    }
    Ok(FactorTable { df })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use ndarray::Array2;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    /// 3 symbols x 6 daily prices with hand-computable factors.
    fn scenario() -> (PricePanel, MarketCapSeries) {
        let dates = (1..=6).map(date).collect();
        let symbols = vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()];
        #[rustfmt::skip]
        let prices = Array2::from_shape_vec(
            (6, 3),
            vec![
                100.0, 200.0, 50.0,
                102.0, 198.0, 50.0,
                104.0, 202.0, 50.0,
                106.0, 196.0, 50.0,
                108.0, 204.0, 50.0,
                110.0, 190.0, 50.0,
            ],
        )
        .unwrap();
        let panel = PricePanel::new(dates, symbols, prices).unwrap();

        let mut caps = MarketCapSeries::new();
        caps.insert_reported("AAA", 1.0e11).unwrap();
        caps.insert_reported("BBB", 2.0e10).unwrap();
        caps.insert_reported("CCC", 5.0e9).unwrap();
        (panel, caps)
    }

    #[test]
    fn test_factor_table_matches_hand_computation() {
        let (panel, caps) = scenario();
        let table = compute_factors(&panel, &caps, &FactorConfig::default()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.symbols().unwrap(), vec!["AAA", "BBB", "CCC"]);

        // Momentum clamps the 252-day lookback to the 5 available rows.
        let momentum = table.factor_values(MOMENTUM_COL).unwrap();
        assert_relative_eq!(momentum[0], 0.10, max_relative = 1e-12);
        assert_relative_eq!(momentum[1], -0.05, max_relative = 1e-12);
        assert_relative_eq!(momentum[2], 0.0, max_relative = 1e-12);

        // Volatility: sample std of the 5 daily returns, annualized.
        let vol = table.factor_values(VOLATILITY_COL).unwrap();
        let aaa_returns = [
            102.0 / 100.0 - 1.0,
            104.0 / 102.0 - 1.0,
            106.0 / 104.0 - 1.0,
            108.0 / 106.0 - 1.0,
            110.0 / 108.0 - 1.0,
        ];
        let mean = aaa_returns.iter().sum::<f64>() / 5.0;
        let std =
            (aaa_returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 4.0).sqrt();
        assert_relative_eq!(vol[0], std * 252.0_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(vol[2], 0.0, max_relative = 1e-12);

        // Size: raw market cap, untransformed.
        let size = table.factor_values(SIZE_COL).unwrap();
        assert_relative_eq!(size[0], 1.0e11);
        assert_relative_eq!(size[1], 2.0e10);
        assert_relative_eq!(size[2], 5.0e9);
    }

    #[test]
    fn test_short_history_fails() {
        let panel = PricePanel::new(
            vec![date(1)],
            vec!["AAA".to_string()],
            Array2::from_shape_vec((1, 1), vec![100.0]).unwrap(),
        )
        .unwrap();
        let mut caps = MarketCapSeries::new();
        caps.insert_reported("AAA", 1.0e9).unwrap();

        let result = compute_factors(&panel, &caps, &FactorConfig::default());
        assert!(matches!(
            result,
            Err(FactorError::Data(
                hobart_data::DataError::InsufficientHistory { .. }
            ))
        ));
    }
}
