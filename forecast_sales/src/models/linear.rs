//! Linear trend model, the fallback when seasonal fitting is unavailable

use crate::error::{ForecastError, Result};
use crate::models::{least_squares_line, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::{future_timestamps, TimeSeries};
use chrono::NaiveDate;
use sales_data::Granularity;

/// Straight-line forecaster over the zero-based observation index
///
/// Deliberately weaker than the seasonal model: point estimates only, no
/// uncertainty bounds.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
    /// Grain used to step future timestamps
    granularity: Granularity,
}

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Grain used to step future timestamps
    granularity: Granularity,
    /// Change in level per index step
    slope: f64,
    /// Level at index zero
    intercept: f64,
    /// Number of training observations
    train_len: usize,
    /// Last training timestamp
    last_timestamp: NaiveDate,
    /// In-sample predictions
    fitted: Vec<f64>,
}

impl LinearTrend {
    /// Create a new linear trend model
    pub fn new(granularity: Granularity) -> Self {
        Self {
            name: format!("Linear Trend ({})", granularity),
            granularity,
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new(Granularity::default())
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, data: &TimeSeries) -> Result<Self::Trained> {
        if data.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Linear trend needs at least 2 observations, got {}",
                data.len()
            )));
        }

        let values = data.values();
        let (slope, intercept) = least_squares_line(values).ok_or_else(|| {
            ForecastError::InsufficientData("undetermined trend line".to_string())
        })?;
        let last_timestamp = data
            .last_timestamp()
            .ok_or_else(|| ForecastError::InsufficientData("empty series".to_string()))?;

        let fitted = (0..values.len())
            .map(|i| slope * i as f64 + intercept)
            .collect();

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            granularity: self.granularity,
            slope,
            intercept,
            train_len: values.len(),
            last_timestamp,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        self.forecast_at(&future_timestamps(
            self.last_timestamp,
            horizon,
            self.granularity,
        ))
    }

    fn forecast_at(&self, timestamps: &[NaiveDate]) -> Result<ForecastResult> {
        // The line continues over the index sequence past the training span;
        // target dates only label the points
        let values: Vec<f64> = (self.train_len..self.train_len + timestamps.len())
            .map(|i| self.slope * i as f64 + self.intercept)
            .collect();

        ForecastResult::new(timestamps.to_vec(), values, self.fitted.clone())
    }

    fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}
