//! Error types for the nextq_forecast crate

use chrono::NaiveDate;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the nextq_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Reference data (holiday calendar) is missing or malformed
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Uploaded table is missing required columns or holds unparseable values
    #[error("Schema error: {0}")]
    Schema(String),

    /// The store/item filter matched no rows; the caller should prompt the
    /// user to adjust the selection rather than abort
    #[error("No rows match the current store/item selection")]
    EmptySelection,

    /// A selected regressor has no value for a date the model needs
    #[error("Regressor '{name}' has no value for {date}")]
    MissingRegressor {
        /// Name of the regressor column
        name: String,
        /// First date lacking a value
        date: NaiveDate,
    },

    /// Error from invalid configuration parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::Polars(err.to_string())
    }
}

impl ForecastError {
    /// Whether the error is user-correctable by changing the selection or
    /// upload, as opposed to a configuration/deployment problem.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ForecastError::EmptySelection)
    }
}
