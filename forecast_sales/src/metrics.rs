//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

/// Evaluate a forecast against the held-out actual values
///
/// Both slices must have the same non-zero length. Metrics come back at
/// full precision; rounding for display is the caller's concern.
pub fn evaluate_forecast(actual: &[f64], predicted: &[f64]) -> Result<EvaluationMetrics> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::DimensionMismatch(format!(
            "Actual and predicted values must have the same non-zero length, got {} and {}",
            actual.len(),
            predicted.len()
        )));
    }

    let n = actual.len() as f64;

    // Calculate errors
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| a - p)
        .collect();

    // Mean Absolute Error
    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;

    // Root Mean Squared Error
    let rmse = (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt();

    Ok(EvaluationMetrics { mae, rmse })
}

impl std::fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:  {:.4}", self.mae)?;
        writeln!(f, "  RMSE: {:.4}", self.rmse)?;
        Ok(())
    }
}
