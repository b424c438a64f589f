//! Price Momentum Factor
//!
//! Measures the percentage price change from `lookback` trading days ago to
//! the most recent date, per symbol. Captures persistent trends in security
//! prices; higher momentum is more favorable.

use hobart_data::{DataError, PricePanel};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the Momentum factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Lookback window in trading days (default: 252 for ~12 months)
    pub lookback_days: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { lookback_days: 252 }
    }
}

/// Momentum computes the trailing percentage price change per symbol.
#[derive(Debug, Default)]
pub struct MomentumFactor {
    config: MomentumConfig,
}

impl MomentumFactor {
    /// Create a momentum factor with the given configuration.
    pub const fn with_config(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &MomentumConfig {
        &self.config
    }

    /// Compute momentum values, one per panel symbol in column order.
    ///
    /// When the panel holds fewer than `lookback_days + 1` rows the lookback
    /// is clamped to `rows - 1` so short histories still produce a value.
    ///
    /// # Errors
    ///
    /// [`DataError::InsufficientHistory`] if the panel has fewer than 2 rows.
    pub fn compute(&self, panel: &PricePanel) -> Result<Vec<f64>> {
        let rows = panel.num_dates();
        if rows < 2 {
            return Err(DataError::InsufficientHistory {
                required: 2,
                actual: rows,
            }
            .into());
        }

        let lookback = self.config.lookback_days.min(rows - 1);
        let prices = panel.prices();
        let last = rows - 1;
        let base = last - lookback;

        let values = (0..panel.num_symbols())
            .map(|j| prices[[last, j]] / prices[[base, j]] - 1.0)
            .collect();
        Ok(values)
    }
}
