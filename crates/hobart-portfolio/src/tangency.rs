//! Maximum-Sharpe (tangency) portfolio approximation.
//!
//! Solves the unconstrained closed form `w = Σ⁻¹μ / (1ᵀ Σ⁻¹μ)` over daily
//! returns of the selected symbols, then clips negative entries to zero and
//! renormalizes. The clip step is a heuristic approximation of a long-only
//! tangency portfolio, not an exact solution of the constrained problem; it
//! is kept as-is for compatibility with the original strategy.

use hobart_data::PricePanel;
use ndarray::{Array1, Array2};

use crate::covariance::{mean_returns, sample_covariance};
use crate::error::{Result, WeightingError};
use crate::weights::WeightVector;

/// Pivot threshold below which Gauss–Jordan elimination reports singularity.
const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Threshold for the `1ᵀΣ⁻¹μ` normalization denominator.
const DENOMINATOR_TOLERANCE: f64 = 1e-12;

/// Invert a square matrix by Gauss–Jordan elimination with partial pivoting.
fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(WeightingError::DimensionMismatch {
            expected: n,
            actual: matrix.ncols(),
        });
    }

    let mut a = matrix.clone();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        // Partial pivot: largest absolute value on or below the diagonal.
        let mut pivot_row = col;
        let mut pivot_abs = a[[col, col]].abs();
        for row in (col + 1)..n {
            let candidate = a[[row, col]].abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = row;
            }
        }
        if pivot_abs < SINGULARITY_TOLERANCE || !pivot_abs.is_finite() {
            return Err(WeightingError::SingularCovariance);
        }
        if pivot_row != col {
            for j in 0..n {
                a.swap([col, j], [pivot_row, j]);
                inv.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = a[[col, col]];
        for j in 0..n {
            a[[col, j]] /= pivot;
            inv[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[[row, j]] -= factor * a[[col, j]];
                inv[[row, j]] -= factor * inv[[col, j]];
            }
        }
    }

    Ok(inv)
}

/// Unconstrained tangency weights `Σ⁻¹μ / (1ᵀ Σ⁻¹μ)`.
///
/// The result sums to 1 but may contain negative (short) entries; the
/// long-only clip is applied only by [`compute_optimal_weights`]. Exposed
/// separately so the closed-form solve is verifiable on its own.
///
/// # Errors
///
/// * [`WeightingError::DimensionMismatch`] if `mu` and `cov` disagree
/// * [`WeightingError::SingularCovariance`] if `cov` is not invertible
/// * [`WeightingError::DegenerateSolution`] if `1ᵀΣ⁻¹μ` is ~0
pub fn tangency_weights(mu: &Array1<f64>, cov: &Array2<f64>) -> Result<Array1<f64>> {
    if cov.nrows() != mu.len() {
        return Err(WeightingError::DimensionMismatch {
            expected: mu.len(),
            actual: cov.nrows(),
        });
    }

    let inv_cov = invert(cov)?;
    let numer = inv_cov.dot(mu);
    let denom: f64 = numer.sum();
    if denom.abs() < DENOMINATOR_TOLERANCE {
        return Err(WeightingError::DegenerateSolution { denominator: denom });
    }
    Ok(numer / denom)
}

/// Long-only maximum-Sharpe weights for the selected symbols.
///
/// Restricts the panel to `selected`, computes daily returns, solves the
/// unconstrained tangency portfolio, clips negative weights to zero, and
/// renormalizes to sum to 1.
///
/// # Errors
///
/// * [`hobart_data::DataError::UnknownSymbol`] if a symbol is not in the panel
/// * [`WeightingError::InsufficientObservations`] with fewer than 2 returns
/// * [`WeightingError::SingularCovariance`] if Σ is not invertible (e.g.
///   fewer return observations than assets, or collinear return series)
pub fn compute_optimal_weights(panel: &PricePanel, selected: &[String]) -> Result<WeightVector> {
    let sub = panel.restrict(selected)?;
    let returns = sub.daily_returns().map_err(WeightingError::Data)?;

    let mu = mean_returns(&returns);
    let cov = sample_covariance(&returns)?;
    let raw = tangency_weights(&mu, &cov)?;

    // Long-only heuristic: clip shorts, renormalize. The normalized raw
    // weights sum to 1, so at least one entry is positive and the clipped
    // sum cannot be zero.
    let clipped = raw.mapv(|w| w.max(0.0));
    let total = clipped.sum();
    let weights = clipped / total;

    WeightVector::new(selected.to_vec(), weights.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::NaiveDate;

    fn panel(prices: Vec<f64>, symbols: &[&str]) -> PricePanel {
        let cols = symbols.len();
        let rows = prices.len() / cols;
        let dates = (1..=rows as u32)
            .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
            .collect();
        PricePanel::new(
            dates,
            symbols.iter().map(|s| s.to_string()).collect(),
            Array2::from_shape_vec((rows, cols), prices).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_invert_identity() {
        let eye = Array2::<f64>::eye(3);
        let inv = invert(&eye).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(inv[[i, j]], eye[[i, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_invert_known_matrix() {
        // [[4, 7], [2, 6]]⁻¹ = [[0.6, −0.7], [−0.2, 0.4]]
        let m = Array2::from_shape_vec((2, 2), vec![4.0, 7.0, 2.0, 6.0]).unwrap();
        let inv = invert(&m).unwrap();

        assert_abs_diff_eq!(inv[[0, 0]], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[0, 1]], -0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[1, 0]], -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[1, 1]], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_invert_singular_matrix() {
        let m = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        assert!(matches!(
            invert(&m),
            Err(WeightingError::SingularCovariance)
        ));
    }

    #[test]
    fn test_tangency_weights_analytic_two_assets() {
        // Diagonal Σ: w_raw ∝ μᵢ/σᵢ², so w = (0.5, 1.0)/1.5 = (1/3, 2/3).
        let mu = Array1::from_vec(vec![0.02, 0.01]);
        let cov = Array2::from_shape_vec((2, 2), vec![0.04, 0.0, 0.0, 0.01]).unwrap();

        let weights = tangency_weights(&mu, &cov).unwrap();
        assert_relative_eq!(weights[0], 1.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 2.0 / 3.0, max_relative = 1e-12);
        assert_abs_diff_eq!(weights.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tangency_weights_can_be_negative_before_clip() {
        let mu = Array1::from_vec(vec![0.02, -0.01]);
        let cov = Array2::from_shape_vec((2, 2), vec![0.04, 0.0, 0.0, 0.01]).unwrap();

        // Raw solve: (0.5, −1.0) / −0.5 = (−1.0, 2.0), still summing to 1.
        let weights = tangency_weights(&mu, &cov).unwrap();
        assert_relative_eq!(weights[0], -1.0, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 2.0, max_relative = 1e-12);
        assert_abs_diff_eq!(weights.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_optimal_weights_non_negative_unit_sum() {
        let p = panel(
            vec![
                100.0, 50.0, 30.0, //
                101.0, 50.5, 29.7, //
                100.5, 51.5, 30.3, //
                102.0, 51.0, 30.0, //
                103.0, 52.0, 30.6, //
            ],
            &["AAA", "BBB", "CCC"],
        );
        let selected: Vec<String> =
            ["AAA", "BBB", "CCC"].iter().map(|s| s.to_string()).collect();

        let vector = compute_optimal_weights(&p, &selected).unwrap();
        assert_eq!(vector.len(), 3);
        for (_, weight) in vector.iter() {
            assert!(weight >= 0.0);
        }
        assert_abs_diff_eq!(vector.values().iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collinear_series_is_singular() {
        // BBB is a constant multiple of AAA: identical returns, singular Σ.
        let p = panel(
            vec![
                100.0, 200.0, //
                110.0, 220.0, //
                104.5, 209.0, //
                115.0, 230.0, //
            ],
            &["AAA", "BBB"],
        );
        let selected: Vec<String> = ["AAA", "BBB"].iter().map(|s| s.to_string()).collect();

        assert!(matches!(
            compute_optimal_weights(&p, &selected),
            Err(WeightingError::SingularCovariance)
        ));
    }

    #[test]
    fn test_single_asset_gets_full_weight() {
        let p = panel(vec![100.0, 101.0, 99.5, 102.0], &["AAA"]);
        let selected = vec!["AAA".to_string()];

        let vector = compute_optimal_weights(&p, &selected).unwrap();
        assert_eq!(vector.len(), 1);
        assert_abs_diff_eq!(vector.get("AAA").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clip_and_renormalize() {
        // Craft a panel whose tangency solve shorts one asset: a steadily
        // falling price with low volatility against a rising one.
        let p = panel(
            vec![
                100.0, 50.00, //
                102.0, 49.80, //
                101.0, 49.62, //
                104.0, 49.40, //
                106.0, 49.25, //
                105.0, 49.02, //
            ],
            &["UP", "DOWN"],
        );
        let selected: Vec<String> = ["UP", "DOWN"].iter().map(|s| s.to_string()).collect();

        let returns = p.daily_returns().unwrap();
        let mu = mean_returns(&returns);
        let cov = sample_covariance(&returns).unwrap();
        let raw = tangency_weights(&mu, &cov).unwrap();
        assert!(
            raw.iter().any(|&w| w < 0.0),
            "scenario must produce a short leg, got {raw:?}"
        );

        let vector = compute_optimal_weights(&p, &selected).unwrap();
        for (_, weight) in vector.iter() {
            assert!(weight >= 0.0);
        }
        assert_abs_diff_eq!(vector.values().iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }
}
