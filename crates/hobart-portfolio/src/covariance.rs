//! Sample moments of daily returns.
//!
//! Column means and the sample covariance matrix (ddof = 1) of a returns
//! matrix where each row is a period and each column is an asset.

use ndarray::{Array1, Array2};

use crate::error::{Result, WeightingError};

/// Column means of a returns matrix.
pub fn mean_returns(returns: &Array2<f64>) -> Array1<f64> {
    let rows = returns.nrows();
    let cols = returns.ncols();
    let mut means = Array1::<f64>::zeros(cols);
    if rows == 0 {
        return means;
    }
    for j in 0..cols {
        let mut sum = 0.0;
        for t in 0..rows {
            sum += returns[[t, j]];
        }
        means[j] = sum / rows as f64;
    }
    means
}

/// Sample covariance matrix (ddof = 1) of a returns matrix.
///
/// # Errors
///
/// [`WeightingError::InsufficientObservations`] with fewer than 2 rows.
pub fn sample_covariance(returns: &Array2<f64>) -> Result<Array2<f64>> {
    let rows = returns.nrows();
    if rows < 2 {
        return Err(WeightingError::InsufficientObservations {
            required: 2,
            actual: rows,
        });
    }

    let cols = returns.ncols();
    let means = mean_returns(returns);

    let mut cov = Array2::<f64>::zeros((cols, cols));
    for i in 0..cols {
        for j in i..cols {
            let mut sum = 0.0;
            for t in 0..rows {
                sum += (returns[[t, i]] - means[i]) * (returns[[t, j]] - means[j]);
            }
            let value = sum / (rows - 1) as f64;
            cov[[i, j]] = value;
            cov[[j, i]] = value;
        }
    }
    Ok(cov)
}
