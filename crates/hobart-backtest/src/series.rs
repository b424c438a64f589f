//! Date-indexed portfolio series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BacktestError, Result};

/// Per-period portfolio returns, date-indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

/// Cumulative growth factors, date-indexed.
///
/// The value at step `t` is the product of `(1 + return)` for all returns up
/// to and including `t`; the curve starts implicitly at 1.0 before the first
/// period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

macro_rules! series_impl {
    ($name:ident) => {
        impl $name {
            /// Build a series from parallel date and value axes.
            ///
            /// # Errors
            ///
            /// [`BacktestError::LengthMismatch`] if the axes differ in length.
            pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
                if dates.len() != values.len() {
                    return Err(BacktestError::LengthMismatch {
                        dates: dates.len(),
                        values: values.len(),
                    });
                }
                Ok(Self { dates, values })
            }

            /// Number of periods.
            pub const fn len(&self) -> usize {
                self.values.len()
            }

            /// Whether the series has no periods.
            pub const fn is_empty(&self) -> bool {
                self.values.is_empty()
            }

            /// Date axis.
            pub fn dates(&self) -> &[NaiveDate] {
                &self.dates
            }

            /// Value axis.
            pub fn values(&self) -> &[f64] {
                &self.values
            }

            /// Last value, if any.
            pub fn last(&self) -> Option<f64> {
                self.values.last().copied()
            }

            /// Iterate `(date, value)` pairs in period order.
            pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
                self.dates.iter().copied().zip(self.values.iter().copied())
            }
        }
    };
}

series_impl!(ReturnSeries);
series_impl!(CumulativeSeries);
