//! Performance summary of a backtest.
//!
//! Total return, annualized volatility, and Sharpe ratio computed from the
//! return and cumulative series. A zero-volatility return series yields a NaN
//! Sharpe ratio rather than an error; NaN is data here, guarding the division
//! by zero without raising.

use std::fmt;

use chrono::NaiveDate;
use hobart_data::TRADING_DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

use crate::error::{BacktestError, Result};
use crate::series::{CumulativeSeries, ReturnSeries};

/// Summary statistics for a backtested portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    /// Portfolio or strategy name.
    pub name: String,

    /// First return period.
    pub period_start: NaiveDate,

    /// Last return period.
    pub period_end: NaiveDate,

    /// Growth of one unit over the horizon, minus 1.
    pub total_return: f64,

    /// Sample standard deviation of per-period returns, scaled by sqrt(252).
    pub annualized_volatility: f64,

    /// `mean(returns) / std(returns) × sqrt(252)`; NaN when std is exactly 0.
    pub sharpe_ratio: f64,
}

impl PerformanceSummary {
    /// Compute summary statistics from a backtest result.
    ///
    /// # Errors
    ///
    /// [`BacktestError::EmptySeries`] if the return series has no periods, or
    /// [`BacktestError::LengthMismatch`] if the two series disagree.
    pub fn from_backtest(
        name: impl Into<String>,
        returns: &ReturnSeries,
        cumulative: &CumulativeSeries,
    ) -> Result<Self> {
        if returns.is_empty() {
            return Err(BacktestError::EmptySeries);
        }
        if returns.len() != cumulative.len() {
            return Err(BacktestError::LengthMismatch {
                dates: returns.len(),
                values: cumulative.len(),
            });
        }

        let values = returns.values();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        // A single period has no sample deviation; NaN propagates as data.
        let std = if values.len() < 2 {
            f64::NAN
        } else {
            (values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        };

        let annualization = TRADING_DAYS_PER_YEAR.sqrt();
        let sharpe_ratio = if std == 0.0 {
            f64::NAN
        } else {
            mean / std * annualization
        };

        Ok(Self {
            name: name.into(),
            period_start: returns.dates()[0],
            period_end: returns.dates()[returns.len() - 1],
            total_return: cumulative.values()[cumulative.len() - 1] - 1.0,
            annualized_volatility: std * annualization,
            sharpe_ratio,
        })
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nPerformance Summary: {}\n", self.name));
        output.push_str(&format!(
            "Period: {} to {}\n",
            self.period_start, self.period_end
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "  Total Return:             {:.2}%\n",
            self.total_return * 100.0
        ));
        output.push_str(&format!(
            "  Annualized Volatility:    {:.2}%\n",
            self.annualized_volatility * 100.0
        ));
        output.push_str(&format!(
            "  Sharpe Ratio:             {:.2}\n",
            self.sharpe_ratio
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Performance Summary: {}\n\n", self.name));
        output.push_str(&format!(
            "**Period:** {} to {}\n\n",
            self.period_start, self.period_end
        ));
        output.push_str(&format!(
            "- **Total Return:** {:.2}%\n",
            self.total_return * 100.0
        ));
        output.push_str(&format!(
            "- **Annualized Volatility:** {:.2}%\n",
            self.annualized_volatility * 100.0
        ));
        output.push_str(&format!("- **Sharpe Ratio:** {:.2}\n", self.sharpe_ratio));

        output
    }
}

impl fmt::Display for PerformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Performance Summary: {} ({} to {})",
            self.name, self.period_start, self.period_end
        )?;
        writeln!(f, "  Total Return: {:.2}%", self.total_return * 100.0)?;
        writeln!(
            f,
            "  Annualized Volatility: {:.2}%",
            self.annualized_volatility * 100.0
        )?;
        writeln!(f, "  Sharpe Ratio: {:.2}", self.sharpe_ratio)?;
        Ok(())
    }
}
