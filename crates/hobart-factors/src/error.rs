//! Error types for factor computation and scoring.

use thiserror::Error;

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;

/// Errors that can occur during factor computation and scoring.
#[derive(Debug, Error)]
pub enum FactorError {
    /// Underlying data model error
    #[error(transparent)]
    Data(#[from] hobart_data::DataError),

    /// Polars computation error
    #[error("Factor computation error: {0}")]
    Computation(#[from] polars::prelude::PolarsError),

    /// Factor table has no rows
    #[error("Factor table is empty")]
    EmptyTable,

    /// Factor weight outside the allowed range
    #[error("Invalid weight {value} for factor {factor}: must be non-negative and finite")]
    InvalidWeight {
        /// Name of the offending factor
        factor: &'static str,
        /// The offending value
        value: f64,
    },
}
