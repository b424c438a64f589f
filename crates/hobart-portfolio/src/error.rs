//! Error types for portfolio weighting.

use thiserror::Error;

/// Result type for weighting operations.
pub type Result<T> = std::result::Result<T, WeightingError>;

/// Errors that can occur during mean-variance weighting.
#[derive(Debug, Error)]
pub enum WeightingError {
    /// Underlying data model error
    #[error(transparent)]
    Data(#[from] hobart_data::DataError),

    /// Covariance matrix is not invertible
    ///
    /// Typically fewer return observations than assets, or perfectly
    /// collinear return series. No automatic fallback to equal weight is
    /// applied; the caller must decide.
    #[error("Covariance matrix is singular (not invertible)")]
    SingularCovariance,

    /// Tangency direction has zero net exposure (`1ᵀΣ⁻¹μ ≈ 0`), so the raw
    /// solution cannot be normalized to sum to 1
    #[error("Degenerate tangency solution: normalization denominator {denominator} is ~0")]
    DegenerateSolution {
        /// Value of `1ᵀΣ⁻¹μ`
        denominator: f64,
    },

    /// Too few return observations for a sample covariance
    #[error("Insufficient observations: need at least {required}, got {actual}")]
    InsufficientObservations {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Dimension mismatch between inputs
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Weight vector violates its invariant
    #[error("Invalid weight vector: {reason}")]
    InvalidWeights {
        /// What was violated
        reason: String,
    },
}
