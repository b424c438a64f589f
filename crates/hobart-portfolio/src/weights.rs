//! Portfolio weight vector and weighting-method selection.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeightingError};

/// Tolerance for the unit-sum invariant of a weight vector.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// How the portfolio weights are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum WeightingMethod {
    /// Each selected symbol contributes 1/k of the portfolio return; no
    /// weight vector is materialized.
    #[default]
    #[display("equal-weight")]
    EqualWeight,
    /// Unconstrained tangency solve with the long-only clip heuristic.
    #[display("max-sharpe")]
    MaxSharpe,
}

/// Non-negative per-symbol weights summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    entries: Vec<(String, f64)>,
}

impl WeightVector {
    /// Build a weight vector, enforcing its invariant.
    ///
    /// # Errors
    ///
    /// [`WeightingError::InvalidWeights`] if lengths differ, any weight is
    /// negative or non-finite, or the sum is not 1 within
    /// [`WEIGHT_SUM_TOLERANCE`].
    pub fn new(symbols: Vec<String>, weights: Vec<f64>) -> Result<Self> {
        if symbols.len() != weights.len() {
            return Err(WeightingError::InvalidWeights {
                reason: format!("{} symbols but {} weights", symbols.len(), weights.len()),
            });
        }
        if symbols.is_empty() {
            return Err(WeightingError::InvalidWeights {
                reason: "empty weight vector".to_string(),
            });
        }
        for (symbol, &weight) in symbols.iter().zip(&weights) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightingError::InvalidWeights {
                    reason: format!("weight {weight} for {symbol} is negative or non-finite"),
                });
            }
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightingError::InvalidWeights {
                reason: format!("weights sum to {sum}, expected 1"),
            });
        }

        Ok(Self {
            entries: symbols.into_iter().zip(weights).collect(),
        })
    }

    /// Number of weighted symbols.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector is empty (never true for a constructed vector).
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of one symbol, if present.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, w)| *w)
    }

    /// Symbols in vector order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// Weights in vector order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    /// Iterate `(symbol, weight)` pairs in vector order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(s, w)| (s.as_str(), *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_valid_vector() {
        let vector = WeightVector::new(
            vec!["AAA".to_string(), "BBB".to_string()],
            vec![0.25, 0.75],
        )
        .unwrap();

        assert_eq!(vector.len(), 2);
        assert_abs_diff_eq!(vector.get("BBB").unwrap(), 0.75);
        assert_eq!(vector.get("ZZZ"), None);
        assert_abs_diff_eq!(vector.values().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = WeightVector::new(
            vec!["AAA".to_string(), "BBB".to_string()],
            vec![-0.25, 1.25],
        );
        assert!(matches!(result, Err(WeightingError::InvalidWeights { .. })));
    }

    #[test]
    fn test_bad_sum_rejected() {
        let result = WeightVector::new(
            vec!["AAA".to_string(), "BBB".to_string()],
            vec![0.25, 0.25],
        );
        assert!(matches!(result, Err(WeightingError::InvalidWeights { .. })));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = WeightVector::new(vec!["AAA".to_string()], vec![0.5, 0.5]);
        assert!(matches!(result, Err(WeightingError::InvalidWeights { .. })));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(WeightingMethod::EqualWeight.to_string(), "equal-weight");
        assert_eq!(WeightingMethod::MaxSharpe.to_string(), "max-sharpe");
        assert_eq!(WeightingMethod::default(), WeightingMethod::EqualWeight);
    }
}
