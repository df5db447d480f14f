//! # Forecast Sales
//!
//! A Rust library for forecasting sales time series.
//!
//! ## Features
//!
//! - Temporal train/test splitting at a trailing calendar-month cutoff
//! - Seasonal trend model (linear trend plus yearly seasonality, additive or
//!   multiplicative) with uncertainty bounds
//! - Linear trend fallback when the seasonal model cannot fit
//! - Forecast evaluation with MAE and RMSE
//! - A single pipeline driving split, fit, evaluation and forecast
//!
//! ## Quick Start
//!
//! ```
//! use forecast_sales::{ForecastPipeline, PipelineConfig, TimeSeries};
//! use sales_data::utils::generate_sales_history;
//! use sales_data::Granularity;
//!
//! # fn main() -> forecast_sales::Result<()> {
//! // Two years of synthetic monthly sales
//! let points = generate_sales_history(24, 10_000.0, 150.0, 2_000.0, 250.0, 7);
//! let series = TimeSeries::from_sales_points(&points)?;
//!
//! let config = PipelineConfig {
//!     horizon: 3,
//!     test_window_months: 12,
//!     granularity: Granularity::Monthly,
//!     ..PipelineConfig::default()
//! };
//!
//! let outcome = ForecastPipeline::new(config)?.run(&series)?;
//! assert_eq!(outcome.forecast.horizon(), 3);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod series;
pub mod split;

// Re-export commonly used types
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::{evaluate_forecast, EvaluationMetrics};
pub use crate::models::linear::LinearTrend;
pub use crate::models::seasonal::{SeasonalTrend, SeasonalityMode};
pub use crate::models::{ForecastModel, ForecastResult, ModelKind, TrainedForecastModel};
pub use crate::pipeline::{ForecastOutcome, ForecastPipeline, PipelineConfig};
pub use crate::series::TimeSeries;
pub use crate::split::{train_test_split, SplitResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
