//! Historical Volatility Factor
//!
//! Measures realized volatility of daily returns over a trailing window,
//! annualized by sqrt(252). Lower volatility securities tend to exhibit
//! better risk-adjusted returns.

use hobart_data::{PricePanel, TRADING_DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the Volatility factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Trailing window in trading days (default: 252 for ~12 months)
    pub window_days: usize,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self { window_days: 252 }
    }
}

/// Volatility computes annualized trailing return volatility per symbol.
#[derive(Debug, Default)]
pub struct VolatilityFactor {
    config: VolatilityConfig,
}

impl VolatilityFactor {
    /// Create a volatility factor with the given configuration.
    pub const fn with_config(config: VolatilityConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &VolatilityConfig {
        &self.config
    }

    /// Compute annualized volatility values, one per panel symbol.
    ///
    /// Uses the sample standard deviation of daily percentage returns over
    /// the trailing `window_days` observations (all available observations if
    /// fewer), scaled by sqrt(252). A single-return history has no sample
    /// standard deviation and yields NaN, which propagates into scoring.
    ///
    /// # Errors
    ///
    /// [`hobart_data::DataError::InsufficientHistory`] if the panel has fewer
    /// than 2 rows.
    pub fn compute(&self, panel: &PricePanel) -> Result<Vec<f64>> {
        let returns = panel.daily_returns()?;
        let n_returns = returns.nrows();
        let window = self.config.window_days.min(n_returns);
        let start = n_returns - window;

        let values = (0..panel.num_symbols())
            .map(|j| {
                let tail: Vec<f64> = (start..n_returns).map(|t| returns[[t, j]]).collect();
                sample_std(&tail) * TRADING_DAYS_PER_YEAR.sqrt()
            })
            .collect();
        Ok(values)
    }
}

/// Sample standard deviation (ddof = 1); NaN for fewer than 2 observations.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use ndarray::Array2;

    fn panel(prices: Vec<f64>) -> PricePanel {
        let rows = prices.len();
        let dates = (1..=rows as u32)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        PricePanel::new(
            dates,
            vec!["AAA".to_string()],
            Array2::from_shape_vec((rows, 1), prices).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_sample_std() {
        assert_relative_eq!(sample_std(&[1.0, 2.0, 3.0, 4.0]), (5.0f64 / 3.0).sqrt());
        assert!(sample_std(&[1.0]).is_nan());
        assert!(sample_std(&[]).is_nan());
    }

    #[test]
    fn test_volatility_hand_computed() {
        // Returns: 0.10, -0.10; sample std = 0.2 / sqrt(2)
        let p = panel(vec![100.0, 110.0, 99.0]);
        let factor = VolatilityFactor::default();

        let values = factor.compute(&p).unwrap();
        let expected = (0.2 / 2.0_f64.sqrt()) * 252.0_f64.sqrt();
        assert_relative_eq!(values[0], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_volatility_window_truncates() {
        // Large early move outside a 2-return window must not contribute.
        let p = panel(vec![100.0, 300.0, 330.0, 297.0]);
        let factor = VolatilityFactor::with_config(VolatilityConfig { window_days: 2 });

        let values = factor.compute(&p).unwrap();
        let expected = (0.2 / 2.0_f64.sqrt()) * 252.0_f64.sqrt();
        assert_relative_eq!(values[0], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_volatility_constant_prices_is_zero() {
        let p = panel(vec![50.0, 50.0, 50.0, 50.0]);
        let factor = VolatilityFactor::default();

        let values = factor.compute(&p).unwrap();
        assert_relative_eq!(values[0], 0.0);
    }

    #[test]
    fn test_volatility_single_return_is_nan() {
        let p = panel(vec![100.0, 101.0]);
        let factor = VolatilityFactor::default();

        let values = factor.compute(&p).unwrap();
        assert!(values[0].is_nan());
    }
}
