//! Seasonal trend model: least-squares trend plus yearly seasonality
//!
//! The primary forecaster. It decomposes the training series into a linear
//! trend over the observation index and a seasonal index per calendar
//! position (month of year for monthly data, day of year for daily data), so
//! a single observed year is enough to pick up the yearly pattern. Weekly
//! patterns are not modeled; daily sales aggregates are dominated by the
//! yearly cycle.

use crate::error::{ForecastError, Result};
use crate::models::{least_squares_line, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::{future_timestamps, TimeSeries};
use chrono::{Datelike, NaiveDate};
use sales_data::Granularity;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Minimum observations for a determined trend line
const MIN_TRAIN_POINTS: usize = 2;

/// How the seasonal component combines with the trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityMode {
    /// Seasonal index is added to the trend
    Additive,
    /// Seasonal index scales the trend
    Multiplicative,
}

impl Default for SeasonalityMode {
    fn default() -> Self {
        SeasonalityMode::Additive
    }
}

impl std::str::FromStr for SeasonalityMode {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "additive" => Ok(SeasonalityMode::Additive),
            "multiplicative" => Ok(SeasonalityMode::Multiplicative),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unsupported seasonality mode: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SeasonalityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonalityMode::Additive => write!(f, "additive"),
            SeasonalityMode::Multiplicative => write!(f, "multiplicative"),
        }
    }
}

/// Trend-plus-yearly-seasonality forecaster
#[derive(Debug, Clone)]
pub struct SeasonalTrend {
    /// Name of the model
    name: String,
    /// How seasonality combines with the trend
    mode: SeasonalityMode,
    /// Grain of the series, which fixes the seasonal period
    granularity: Granularity,
    /// Confidence level behind the uncertainty bounds
    confidence_level: f64,
    /// Standard-normal quantile for the confidence level
    z_score: f64,
}

/// Trained seasonal trend model
#[derive(Debug, Clone)]
pub struct TrainedSeasonalTrend {
    /// Name of the model
    name: String,
    /// How seasonality combines with the trend
    mode: SeasonalityMode,
    /// Grain used to step future timestamps
    granularity: Granularity,
    /// Change in trend level per index step
    slope: f64,
    /// Trend level at index zero
    intercept: f64,
    /// Seasonal index per calendar position
    seasonal_indices: Vec<f64>,
    /// Standard deviation of the in-sample residuals
    sigma: f64,
    /// Standard-normal quantile for the confidence level
    z_score: f64,
    /// Number of training observations
    train_len: usize,
    /// Last training timestamp
    last_timestamp: NaiveDate,
    /// In-sample predictions
    fitted: Vec<f64>,
}

impl SeasonalTrend {
    /// Create a new seasonal trend model
    ///
    /// `confidence_level` drives the width of the uncertainty bounds and
    /// must lie strictly between 0 and 1.
    pub fn new(
        mode: SeasonalityMode,
        granularity: Granularity,
        confidence_level: f64,
    ) -> Result<Self> {
        if confidence_level <= 0.0 || confidence_level >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        let z_score = normal.inverse_cdf((1.0 + confidence_level) / 2.0);

        Ok(Self {
            name: format!("Seasonal Trend ({}, {})", mode, granularity),
            mode,
            granularity,
            confidence_level,
            z_score,
        })
    }

    /// The configured confidence level
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Whether this model can be fitted to the given series
    ///
    /// True when the training preconditions hold: enough observations, a
    /// non-degenerate spread of values, and strictly positive values under
    /// multiplicative seasonality. Callers use this as a cheap probe before
    /// attempting the fit; the fit itself can still fail on conditions only
    /// visible once the trend is estimated.
    pub fn supports(&self, data: &TimeSeries) -> bool {
        self.precondition_error(data).is_none()
    }

    /// First violated training precondition, if any
    fn precondition_error(&self, data: &TimeSeries) -> Option<ForecastError> {
        if data.len() < MIN_TRAIN_POINTS {
            return Some(ForecastError::ModelFit(format!(
                "Seasonal trend needs at least {} observations, got {}",
                MIN_TRAIN_POINTS,
                data.len()
            )));
        }

        let values = data.values();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        if variance == 0.0 {
            return Some(ForecastError::ModelFit(
                "Degenerate series: all observations are identical".to_string(),
            ));
        }

        if self.mode == SeasonalityMode::Multiplicative && values.iter().any(|v| *v <= 0.0) {
            return Some(ForecastError::ModelFit(
                "Multiplicative seasonality requires strictly positive values".to_string(),
            ));
        }

        None
    }
}

impl ForecastModel for SeasonalTrend {
    type Trained = TrainedSeasonalTrend;

    fn train(&self, data: &TimeSeries) -> Result<Self::Trained> {
        if let Some(err) = self.precondition_error(data) {
            return Err(err);
        }

        let values = data.values();
        let (slope, intercept) = least_squares_line(values)
            .ok_or_else(|| ForecastError::ModelFit("undetermined trend line".to_string()))?;
        let last_timestamp = data
            .last_timestamp()
            .ok_or_else(|| ForecastError::ModelFit("empty series".to_string()))?;

        let trend: Vec<f64> = (0..values.len())
            .map(|i| slope * i as f64 + intercept)
            .collect();

        // Ratios against a non-positive trend level are meaningless
        if self.mode == SeasonalityMode::Multiplicative && trend.iter().any(|t| *t <= 0.0) {
            return Err(ForecastError::ModelFit(
                "Non-positive trend level under multiplicative seasonality".to_string(),
            ));
        }

        // Mean seasonal component per calendar position; positions never
        // observed keep the neutral index
        let period = period_len(self.granularity);
        let mut sums = vec![0.0; period];
        let mut counts = vec![0usize; period];

        for (i, (&ts, &y)) in data.timestamps().iter().zip(values).enumerate() {
            let position = period_position(ts, self.granularity);
            let component = match self.mode {
                SeasonalityMode::Additive => y - trend[i],
                SeasonalityMode::Multiplicative => y / trend[i],
            };
            sums[position] += component;
            counts[position] += 1;
        }

        let neutral = match self.mode {
            SeasonalityMode::Additive => 0.0,
            SeasonalityMode::Multiplicative => 1.0,
        };
        let seasonal_indices: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| {
                if count > 0 {
                    sum / count as f64
                } else {
                    neutral
                }
            })
            .collect();

        let fitted: Vec<f64> = data
            .timestamps()
            .iter()
            .enumerate()
            .map(|(i, &ts)| {
                let index = seasonal_indices[period_position(ts, self.granularity)];
                match self.mode {
                    SeasonalityMode::Additive => trend[i] + index,
                    SeasonalityMode::Multiplicative => trend[i] * index,
                }
            })
            .collect();

        let sigma = (values
            .iter()
            .zip(&fitted)
            .map(|(y, f)| (y - f).powi(2))
            .sum::<f64>()
            / values.len() as f64)
            .sqrt();

        tracing::debug!(slope, intercept, sigma, "fitted seasonal trend");

        Ok(TrainedSeasonalTrend {
            name: self.name.clone(),
            mode: self.mode,
            granularity: self.granularity,
            slope,
            intercept,
            seasonal_indices,
            sigma,
            z_score: self.z_score,
            train_len: values.len(),
            last_timestamp,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedSeasonalTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        self.forecast_at(&future_timestamps(
            self.last_timestamp,
            horizon,
            self.granularity,
        ))
    }

    fn forecast_at(&self, timestamps: &[NaiveDate]) -> Result<ForecastResult> {
        let mut values = Vec::with_capacity(timestamps.len());
        let mut intervals = Vec::with_capacity(timestamps.len());

        for (step, &ts) in timestamps.iter().enumerate() {
            let index = self.train_len + step;
            let trend = self.slope * index as f64 + self.intercept;
            let seasonal = self.seasonal_indices[period_position(ts, self.granularity)];

            let point = match self.mode {
                SeasonalityMode::Additive => trend + seasonal,
                SeasonalityMode::Multiplicative => trend * seasonal,
            };

            // Bounds widen with the square root of the forecast distance.
            // Sales cannot go negative: the point and both bounds are
            // floored at zero, which keeps lower <= point <= upper.
            let margin = self.z_score * self.sigma * ((step + 1) as f64).sqrt();
            let lower = (point - margin).max(0.0);
            let upper = (point + margin).max(0.0);

            values.push(point.max(0.0));
            intervals.push((lower, upper));
        }

        ForecastResult::new_with_intervals(
            timestamps.to_vec(),
            values,
            intervals,
            self.fitted.clone(),
        )
    }

    fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Seasonal table size for the grain
fn period_len(granularity: Granularity) -> usize {
    match granularity {
        // Day-of-year positions, leap years included
        Granularity::Daily => 366,
        Granularity::Monthly => 12,
    }
}

/// Calendar position of a timestamp within the yearly cycle
fn period_position(date: NaiveDate, granularity: Granularity) -> usize {
    match granularity {
        Granularity::Daily => date.ordinal0() as usize,
        Granularity::Monthly => date.month0() as usize,
    }
}
