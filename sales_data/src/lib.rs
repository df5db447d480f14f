//! # Sales Data
//!
//! `sales_data` loads historical sales orders from CSV, cleans them and
//! aggregates them into a regular time series ready for forecasting.
//!
//! The loading stage follows the shape of a typical retail export (the
//! superstore schema): one row per order with an `Order Date` and a `Sales`
//! amount. Rows with unparseable dates or unusable amounts are dropped rather
//! than failing the whole load, and exact duplicate rows are removed before
//! aggregation.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::NaiveDate;
//! use sales_data::{aggregate, Granularity, SalesRecord};
//!
//! let records = vec![
//!     SalesRecord {
//!         order_date: NaiveDate::from_ymd_opt(2015, 1, 6).unwrap(),
//!         sales: 120.0,
//!     },
//!     SalesRecord {
//!         order_date: NaiveDate::from_ymd_opt(2015, 1, 19).unwrap(),
//!         sales: 80.0,
//!     },
//! ];
//!
//! // One summed value per calendar month, keyed to the first of the month
//! let monthly = aggregate(&records, Granularity::Monthly);
//! assert_eq!(monthly.len(), 1);
//! assert_eq!(monthly[0].sales, 200.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Time-based caching of raw loads
pub mod cache;
// CSV ingestion and aggregation
pub mod loader;
// Synthetic data generation
pub mod utils;

pub use cache::{CachedLoader, TtlCache};
pub use loader::{aggregate, LoadOptions, SalesLoader};

/// Errors that can occur while loading sales data
#[derive(Error, Debug)]
pub enum DataError {
    /// Error reading the source file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required column is missing from the input
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// The input contains no usable data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DataError>;

impl From<polars::prelude::PolarsError> for DataError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        DataError::Csv(err.to_string())
    }
}

/// One cleaned order row: the date it was placed and its sales amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Date the order was placed
    pub order_date: NaiveDate,
    /// Sales amount for the order
    pub sales: f64,
}

/// One aggregated observation: total sales for a single period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    /// First day of the period (the day itself for daily data)
    pub date: NaiveDate,
    /// Total sales over the period
    pub sales: f64,
}

/// Aggregation grain for the sales series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One summed value per day
    Daily,
    /// One summed value per calendar month
    Monthly,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Daily
    }
}

impl std::str::FromStr for Granularity {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "daily" | "d" => Ok(Granularity::Daily),
            "monthly" | "m" => Ok(Granularity::Monthly),
            other => Err(DataError::InvalidData(format!(
                "Unsupported granularity: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
        }
    }
}
