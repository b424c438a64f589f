//! Cross-sectional scoring.
//!
//! Standardizes each factor column into z-scores and combines them into one
//! composite score per symbol. The size column is log-transformed before
//! standardization (internal only) and its z-score sign is flipped so smaller
//! market caps score higher, encoding the small-cap premium convention.
//!
//! NaN behavior is deliberate and documented per step: a zero-variance factor
//! column z-scores to NaN for every symbol (0/0), and NaN propagates through
//! the weighted sum as data rather than raising. A constant factor carries no
//! discriminative information and must not contribute spuriously.

use std::cmp::Ordering;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FactorError, Result};
use crate::table::{FactorTable, MOMENTUM_COL, SIZE_COL, SYMBOL_COL, VOLATILITY_COL};

/// Composite score column name.
pub const SCORE_COL: &str = "score";

/// Relative factor importance, validated and normalized at construction.
///
/// Replaces an open-ended name→weight mapping with one named field per
/// factor; each weight must be non-negative and finite. Weights are stored
/// already normalized to sum to 1; an all-zero input falls back to equal
/// weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    momentum: f64,
    volatility: f64,
    size: f64,
}

impl FactorWeights {
    /// Build weights from raw relative importances.
    ///
    /// # Errors
    ///
    /// [`FactorError::InvalidWeight`] if any value is negative or non-finite.
    pub fn new(momentum: f64, volatility: f64, size: f64) -> Result<Self> {
        for (factor, value) in [
            (MOMENTUM_COL, momentum),
            (VOLATILITY_COL, volatility),
            (SIZE_COL, size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FactorError::InvalidWeight { factor, value });
            }
        }

        let sum = momentum + volatility + size;
        if sum == 0.0 {
            return Ok(Self::equal());
        }
        Ok(Self {
            momentum: momentum / sum,
            volatility: volatility / sum,
            size: size / sum,
        })
    }

    /// Equal weight across the three factors.
    pub const fn equal() -> Self {
        Self {
            momentum: 1.0 / 3.0,
            volatility: 1.0 / 3.0,
            size: 1.0 / 3.0,
        }
    }

    /// Normalized momentum weight.
    pub const fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Normalized volatility weight.
    pub const fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Normalized size weight.
    pub const fn size(&self) -> f64 {
        self.size
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::equal()
    }
}

/// Composite scores, sorted descending with NaN after all numeric scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSeries {
    entries: Vec<(String, f64)>,
}

impl ScoreSeries {
    /// Scored symbols, best first.
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// Number of scored symbols.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series is empty.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols in score order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// Score of one symbol, if present.
    pub fn score(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| *v)
    }
}

/// Standardize the factor columns of a copied table.
///
/// Applies `ln(max(size, 1))`, z-scores every column with the sample standard
/// deviation, and negates the size z-score. The input table is never mutated.
fn standardize(df: DataFrame) -> Result<DataFrame> {
    let zscore = |name: &str| (col(name) - col(name).mean()) / col(name).std(1);

    let standardized = df
        .lazy()
        // Compress the size scale before standardization; internal only.
        .with_columns([col(SIZE_COL)
            .apply(
                |c: Column| {
                    let s = c.as_materialized_series();
                    Ok(Some(
                        s.f64()?
                            .apply_values(|v| v.max(1.0).ln())
                            .into_series()
                            .into(),
                    ))
                },
                GetOutput::from_type(DataType::Float64),
            )
            .alias(SIZE_COL)])
        .with_columns([
            zscore(MOMENTUM_COL).alias(MOMENTUM_COL),
            zscore(VOLATILITY_COL).alias(VOLATILITY_COL),
            // Smaller caps score higher.
            (lit(-1.0) * zscore(SIZE_COL)).alias(SIZE_COL),
        ])
        .collect()?;
    Ok(standardized)
}

/// Descending order with NaN strictly after every numeric score.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Combine standardized factors into one composite score per symbol.
///
/// The caller's table is copied, never mutated. Output is sorted descending
/// by score; ties keep the table's symbol order (stable sort) and NaN scores
/// sort after all numeric ones.
///
/// # Errors
///
/// [`FactorError::EmptyTable`] if the table has no rows, or
/// [`FactorError::Computation`] on a polars failure.
pub fn compute_score(table: &FactorTable, weights: &FactorWeights) -> Result<ScoreSeries> {
    if table.is_empty() {
        return Err(FactorError::EmptyTable);
    }

    let scored = standardize(table.df().clone())?
        .lazy()
        .with_columns([(col(MOMENTUM_COL) * lit(weights.momentum)
            + col(VOLATILITY_COL) * lit(weights.volatility)
            + col(SIZE_COL) * lit(weights.size))
        .alias(SCORE_COL)])
        .select([col(SYMBOL_COL), col(SCORE_COL)])
        .collect()?;

    let symbols = scored.column(SYMBOL_COL)?.str()?;
    let values = scored.column(SCORE_COL)?.f64()?;

    let mut entries: Vec<(String, f64)> = symbols
        .into_iter()
        .zip(values)
        .map(|(symbol, value)| {
            (
                symbol.unwrap_or_default().to_string(),
                value.unwrap_or(f64::NAN),
            )
        })
        .collect();
    entries.sort_by(|a, b| descending_nan_last(a.1, b.1));

    Ok(ScoreSeries { entries })
}
