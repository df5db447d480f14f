//! Error types for the forecast_sales crate

use thiserror::Error;

/// Custom error types for the forecast_sales crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough observations to proceed at all
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A model's fitting preconditions were not met
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// Paired sequences disagree in length
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or conversion
    #[error("Data error: {0}")]
    Data(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<sales_data::DataError> for ForecastError {
    fn from(err: sales_data::DataError) -> Self {
        ForecastError::Data(err.to_string())
    }
}
