//! Time series representation for sales forecasting

use crate::error::{ForecastError, Result};
use chrono::{Duration, Months, NaiveDate};
use sales_data::{Granularity, SalesPoint};

/// A cleaned sales series: one value per timestamp, strictly ascending
///
/// Values are total sales per period, so they are always finite and
/// non-negative. The empty series is a valid value; a train/test split with
/// an oversized window produces one.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Observation timestamps, strictly ascending
    timestamps: Vec<NaiveDate>,
    /// One sales total per timestamp
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a validated time series
    pub fn new(timestamps: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::Data(format!(
                "Timestamps length ({}) doesn't match values length ({})",
                timestamps.len(),
                values.len()
            )));
        }

        for window in timestamps.windows(2) {
            if window[0] >= window[1] {
                return Err(ForecastError::Data(format!(
                    "Timestamps must be strictly ascending, got {} before {}",
                    window[0], window[1]
                )));
            }
        }

        if let Some(value) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(ForecastError::Data(format!(
                "Sales values must be finite and non-negative, got {}",
                value
            )));
        }

        Ok(Self { timestamps, values })
    }

    /// The empty series
    pub fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a series from aggregated sales points
    pub fn from_sales_points(points: &[SalesPoint]) -> Result<Self> {
        let timestamps = points.iter().map(|p| p.date).collect();
        let values = points.iter().map(|p| p.sales).collect();
        Self::new(timestamps, values)
    }

    /// Construct from halves already known to satisfy the invariants
    ///
    /// Only for contiguous pieces of an existing valid series.
    pub(crate) fn from_parts_unchecked(timestamps: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        Self { timestamps, values }
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Observation timestamps
    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// Observation values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First observation timestamp, if any
    pub fn first_timestamp(&self) -> Option<NaiveDate> {
        self.timestamps.first().copied()
    }

    /// Last observation timestamp, if any
    pub fn last_timestamp(&self) -> Option<NaiveDate> {
        self.timestamps.last().copied()
    }
}

/// Create future timestamps strictly after `from`, stepped by the grain
pub fn future_timestamps(
    from: NaiveDate,
    horizon: usize,
    granularity: Granularity,
) -> Vec<NaiveDate> {
    let mut timestamps = Vec::with_capacity(horizon);
    let mut current = from;

    for _ in 0..horizon {
        current = match granularity {
            Granularity::Daily => current + Duration::days(1),
            Granularity::Monthly => current + Months::new(1),
        };
        timestamps.push(current);
    }

    timestamps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_validates_lengths() {
        let err = TimeSeries::new(vec![date(2015, 1, 1)], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ForecastError::Data(_)));
    }

    #[test]
    fn test_new_rejects_unordered_timestamps() {
        let err = TimeSeries::new(
            vec![date(2015, 2, 1), date(2015, 1, 1)],
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::Data(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_timestamps() {
        let err = TimeSeries::new(
            vec![date(2015, 1, 1), date(2015, 1, 1)],
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::Data(_)));
    }

    #[test]
    fn test_new_rejects_negative_and_non_finite_values() {
        let err =
            TimeSeries::new(vec![date(2015, 1, 1)], vec![-1.0]).unwrap_err();
        assert!(matches!(err, ForecastError::Data(_)));

        let err =
            TimeSeries::new(vec![date(2015, 1, 1)], vec![f64::NAN]).unwrap_err();
        assert!(matches!(err, ForecastError::Data(_)));
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = TimeSeries::empty();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert_eq!(series.first_timestamp(), None);
        assert_eq!(series.last_timestamp(), None);
    }

    #[test]
    fn test_from_sales_points() {
        let points = vec![
            SalesPoint {
                date: date(2015, 1, 1),
                sales: 100.0,
            },
            SalesPoint {
                date: date(2015, 2, 1),
                sales: 150.0,
            },
        ];

        let series = TimeSeries::from_sales_points(&points).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[100.0, 150.0]);
        assert_eq!(series.first_timestamp(), Some(date(2015, 1, 1)));
        assert_eq!(series.last_timestamp(), Some(date(2015, 2, 1)));
    }

    #[test]
    fn test_future_timestamps_daily() {
        let future = future_timestamps(date(2015, 12, 30), 3, Granularity::Daily);
        assert_eq!(
            future,
            vec![date(2015, 12, 31), date(2016, 1, 1), date(2016, 1, 2)]
        );
    }

    #[test]
    fn test_future_timestamps_monthly() {
        let future = future_timestamps(date(2015, 11, 1), 3, Granularity::Monthly);
        assert_eq!(
            future,
            vec![date(2015, 12, 1), date(2016, 1, 1), date(2016, 2, 1)]
        );
    }

    #[test]
    fn test_future_timestamps_zero_horizon() {
        assert!(future_timestamps(date(2015, 1, 1), 0, Granularity::Daily).is_empty());
    }
}
