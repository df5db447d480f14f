//! Forecasting models for sales time series

use crate::error::{ForecastError, Result};
use crate::series::TimeSeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;

/// Forecast result spanning the training fit and the future horizon
///
/// The future points always carry timestamps; uncertainty intervals are
/// present only when the model family can quantify its own error.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Future timestamps, strictly after the training span
    pub(crate) timestamps: Vec<NaiveDate>,
    /// Forecasted values, one per future timestamp
    pub(crate) values: Vec<f64>,
    /// Lower/upper uncertainty bounds (optional)
    pub(crate) intervals: Option<Vec<(f64, f64)>>,
    /// In-sample predictions aligned with the training timestamps
    pub(crate) fitted: Vec<f64>,
}

impl ForecastResult {
    /// Create a new forecast result without uncertainty bounds
    pub fn new(
        timestamps: Vec<NaiveDate>,
        values: Vec<f64>,
        fitted: Vec<f64>,
    ) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(ForecastError::DimensionMismatch(format!(
                "Values length ({}) doesn't match timestamps length ({})",
                values.len(),
                timestamps.len()
            )));
        }

        Ok(Self {
            timestamps,
            values,
            intervals: None,
            fitted,
        })
    }

    /// Create a new forecast result with uncertainty bounds
    pub fn new_with_intervals(
        timestamps: Vec<NaiveDate>,
        values: Vec<f64>,
        intervals: Vec<(f64, f64)>,
        fitted: Vec<f64>,
    ) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(ForecastError::DimensionMismatch(format!(
                "Values length ({}) doesn't match timestamps length ({})",
                values.len(),
                timestamps.len()
            )));
        }

        if values.len() != intervals.len() {
            return Err(ForecastError::DimensionMismatch(format!(
                "Values length ({}) doesn't match intervals length ({})",
                values.len(),
                intervals.len()
            )));
        }

        Ok(Self {
            timestamps,
            values,
            intervals: Some(intervals),
            fitted,
        })
    }

    /// Get the future timestamps
    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the uncertainty bounds, if available
    pub fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.intervals.as_deref()
    }

    /// Get the in-sample predictions over the training span
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Number of future periods forecasted
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Whether this forecast carries uncertainty bounds
    pub fn has_uncertainty(&self) -> bool {
        self.intervals.is_some()
    }

    /// The last `n` forecast points as their own result
    ///
    /// The in-sample fit carries over unchanged. Used to separate the
    /// points beyond the observed series from the ones that replay a
    /// held-out window.
    pub fn tail(&self, n: usize) -> Result<Self> {
        if n > self.values.len() {
            return Err(ForecastError::DimensionMismatch(format!(
                "Cannot take the last {} of {} forecast points",
                n,
                self.values.len()
            )));
        }

        let start = self.values.len() - n;
        Ok(Self {
            timestamps: self.timestamps[start..].to_vec(),
            values: self.values[start..].to_vec(),
            intervals: self.intervals.as_ref().map(|iv| iv[start..].to_vec()),
            fitted: self.fitted.clone(),
        })
    }
}

/// Which model family produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Trend plus yearly seasonality decomposition
    Seasonal,
    /// Ordinary least-squares straight line
    Linear,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Seasonal => write!(f, "seasonal"),
            ModelKind::Linear => write!(f, "linear"),
        }
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Forecast the `horizon` consecutive periods after the training span
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Forecast at explicit target timestamps
    ///
    /// The targets extend the observation index in order: the first target
    /// is the next index after training, however far away its calendar date
    /// lies. Seasonal components are read from each target date itself, so
    /// a target list with calendar gaps stays aligned.
    fn forecast_at(&self, timestamps: &[NaiveDate]) -> Result<ForecastResult>;

    /// In-sample predictions aligned with the training timestamps
    fn fitted(&self) -> &[f64];

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a sales series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a sales series
    fn train(&self, data: &TimeSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Least-squares line over the zero-based observation index
///
/// Returns `(slope, intercept)`, or `None` when fewer than two observations
/// make the fit undetermined.
pub(crate) fn least_squares_line(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut x_variance = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        covariance += dx * (y - y_mean);
        x_variance += dx * dx;
    }

    let slope = covariance / x_variance;
    let intercept = y_mean - slope * x_mean;

    Some((slope, intercept))
}

pub mod linear;
pub mod seasonal;
