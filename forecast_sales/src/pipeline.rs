//! End-to-end forecasting pipeline
//!
//! Drives one run: split the series at the trailing cutoff, fit the seasonal
//! model (or fall back to the linear trend when it cannot fit), score the
//! held-out window and forecast past the end of the series. One invocation
//! fits at most two models and never retries the primary.

use crate::error::{ForecastError, Result};
use crate::metrics::{evaluate_forecast, EvaluationMetrics};
use crate::models::linear::LinearTrend;
use crate::models::seasonal::{SeasonalTrend, SeasonalityMode};
use crate::models::{ForecastModel, ForecastResult, ModelKind, TrainedForecastModel};
use crate::series::{future_timestamps, TimeSeries};
use crate::split::train_test_split;
use chrono::NaiveDate;
use sales_data::Granularity;
use serde::{Deserialize, Serialize};

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of future periods to forecast
    pub horizon: usize,
    /// Trailing window held out for evaluation, in calendar months
    pub test_window_months: u32,
    /// Seasonality mode of the primary model
    pub seasonality_mode: SeasonalityMode,
    /// Grain of the input series
    pub granularity: Granularity,
    /// Confidence level behind the primary model's bounds
    pub confidence_level: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizon: 30,
            test_window_months: 3,
            seasonality_mode: SeasonalityMode::default(),
            granularity: Granularity::default(),
            confidence_level: 0.95,
        }
    }
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, Serialize)]
pub struct ForecastOutcome {
    /// Which model family produced the forecast
    pub model: ModelKind,
    /// Future points beyond the last observed timestamp
    pub forecast: ForecastResult,
    /// Held-out accuracy; absent when no test window existed
    pub metrics: Option<EvaluationMetrics>,
}

impl ForecastOutcome {
    /// JSON rendering of the outcome
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ForecastError::Data(e.to_string()))
    }
}

/// Orchestrates splitting, fitting, evaluation and forecasting
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: PipelineConfig,
}

impl ForecastPipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if config.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be at least 1".to_string(),
            ));
        }

        if config.confidence_level <= 0.0 || config.confidence_level >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self { config })
    }

    /// The validated configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over a cleaned sales series
    pub fn run(&self, series: &TimeSeries) -> Result<ForecastOutcome> {
        let last_observed = series.last_timestamp().ok_or_else(|| {
            ForecastError::InsufficientData("Cannot forecast an empty series".to_string())
        })?;

        let split = train_test_split(series, self.config.test_window_months);
        if split.train.is_empty() {
            return Err(ForecastError::InsufficientData(format!(
                "The {}-month test window covers the whole series, leaving no training data",
                self.config.test_window_months
            )));
        }

        tracing::info!(
            train = split.train.len(),
            test = split.test.len(),
            "series split at trailing cutoff"
        );

        // One fit covers the held-out window and the future horizon: the
        // held-out predictions target the real test timestamps, and the
        // future points step on from the last observed one, which keeps them
        // strictly past it even when the test window has calendar gaps
        let mut targets = split.test.timestamps().to_vec();
        targets.extend(future_timestamps(
            last_observed,
            self.config.horizon,
            self.config.granularity,
        ));
        let (model, result) = self.fit_and_forecast(&split.train, &targets)?;

        let metrics = if split.test.is_empty() {
            None
        } else {
            let predicted = &result.values()[..split.test.len()];
            Some(evaluate_forecast(split.test.values(), predicted)?)
        };

        // Keep only the points past the last observed timestamp
        let forecast = result.tail(self.config.horizon)?;

        tracing::info!(
            model = %model,
            future_points = forecast.horizon(),
            evaluated = metrics.is_some(),
            "pipeline run complete"
        );

        Ok(ForecastOutcome {
            model,
            forecast,
            metrics,
        })
    }

    /// Fit the primary model, or the fallback when it cannot fit
    ///
    /// Only a fit error downgrades to the fallback, and only once per run;
    /// anything the fallback raises is final.
    fn fit_and_forecast(
        &self,
        train: &TimeSeries,
        targets: &[NaiveDate],
    ) -> Result<(ModelKind, ForecastResult)> {
        let seasonal = SeasonalTrend::new(
            self.config.seasonality_mode,
            self.config.granularity,
            self.config.confidence_level,
        )?;

        if seasonal.supports(train) {
            match seasonal.train(train) {
                Ok(trained) => {
                    tracing::info!(model = trained.name(), "primary model fitted");
                    return Ok((ModelKind::Seasonal, trained.forecast_at(targets)?));
                }
                Err(ForecastError::ModelFit(reason)) => {
                    tracing::warn!(%reason, "primary model failed to fit, falling back");
                }
                Err(err) => return Err(err),
            }
        } else {
            tracing::warn!("primary model unavailable for this series, falling back");
        }

        let linear = LinearTrend::new(self.config.granularity);
        let trained = linear.train(train)?;
        tracing::info!(model = trained.name(), "fallback model fitted");

        Ok((ModelKind::Linear, trained.forecast_at(targets)?))
    }
}
