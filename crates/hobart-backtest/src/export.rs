//! Export of strategy results for display layers.
//!
//! CSV and JSON export of score tables, weight vectors, backtest series, and
//! performance summaries. The core never persists anything itself; these
//! writers exist for the collaborators that render or archive results.

use chrono::NaiveDate;
use hobart_factors::ScoreSeries;
use hobart_portfolio::WeightVector;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::series::{CumulativeSeries, ReturnSeries};
use crate::summary::PerformanceSummary;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Composite score of a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreExport {
    /// Security symbol.
    pub symbol: String,

    /// Composite factor score.
    pub score: f64,
}

impl ScoreExport {
    /// Flatten a score series into export records, best first.
    pub fn from_series(scores: &ScoreSeries) -> Vec<Self> {
        scores
            .entries()
            .iter()
            .map(|(symbol, score)| Self {
                symbol: symbol.clone(),
                score: *score,
            })
            .collect()
    }
}

/// Portfolio weight of a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightExport {
    /// Security symbol.
    pub symbol: String,

    /// Portfolio weight (0.0 to 1.0).
    pub weight: f64,
}

impl WeightExport {
    /// Flatten a weight vector into export records, in vector order.
    pub fn from_vector(weights: &WeightVector) -> Vec<Self> {
        weights
            .iter()
            .map(|(symbol, weight)| Self {
                symbol: symbol.to_string(),
                weight,
            })
            .collect()
    }
}

/// One backtest period: portfolio return and cumulative growth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestExport {
    /// Period date.
    pub date: NaiveDate,

    /// Portfolio return for the period.
    pub portfolio_return: f64,

    /// Cumulative growth factor up to and including the period.
    pub cumulative: f64,
}

impl BacktestExport {
    /// Zip the return and cumulative series into per-period records.
    ///
    /// # Errors
    ///
    /// [`ExportError::InvalidFormat`] if the series disagree in length.
    pub fn from_series(
        returns: &ReturnSeries,
        cumulative: &CumulativeSeries,
    ) -> Result<Vec<Self>, ExportError> {
        if returns.len() != cumulative.len() {
            return Err(ExportError::InvalidFormat(format!(
                "return series has {} periods but cumulative has {}",
                returns.len(),
                cumulative.len()
            )));
        }
        Ok(returns
            .iter()
            .zip(cumulative.values())
            .map(|((date, portfolio_return), &cumulative)| Self {
                date,
                portfolio_return,
                cumulative,
            })
            .collect())
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn records_to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

macro_rules! exporter_for_records {
    ($record:ty) => {
        impl Exporter for Vec<$record> {
            fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
                match format {
                    ExportFormat::Csv => records_to_csv(self),
                    ExportFormat::Json => Ok(serde_json::to_string(self)?),
                    ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
                }
            }
        }
    };
}

exporter_for_records!(ScoreExport);
exporter_for_records!(WeightExport);
exporter_for_records!(BacktestExport);

impl Exporter for PerformanceSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(std::slice::from_ref(self)),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
