//! Utility functions for generating synthetic sales data
//!
//! Used by demos and tests that need a plausible sales history without
//! shipping a real order export.

use crate::SalesPoint;
use chrono::{Datelike, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Generate a synthetic monthly sales history
///
/// The series is a linear trend plus a yearly seasonal wave plus uniform
/// noise, clamped at zero so it stays a valid sales series. The same seed
/// always produces the same series.
///
/// # Arguments
/// * `months` - Number of monthly points to generate
/// * `base` - Sales level of the first month before seasonality and noise
/// * `trend` - Change in level per month (can be negative)
/// * `seasonal_amplitude` - Peak deviation of the yearly wave
/// * `noise` - Maximum absolute uniform noise per point
/// * `seed` - RNG seed for reproducibility
///
/// # Returns
/// * Vector of monthly sales points starting at January 2020
pub fn generate_sales_history(
    months: usize,
    base: f64,
    trend: f64,
    seasonal_amplitude: f64,
    noise: f64,
    seed: u64,
) -> Vec<SalesPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(months);

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();

    for i in 0..months {
        let date = start + Months::new(i as u32);

        // Yearly wave positioned by calendar month
        let phase = 2.0 * PI * date.month0() as f64 / 12.0;
        let seasonal = seasonal_amplitude * phase.sin();

        let jitter = if noise > 0.0 {
            rng.gen_range(-noise..=noise)
        } else {
            0.0
        };

        let sales = (base + trend * i as f64 + seasonal + jitter).max(0.0);
        points.push(SalesPoint { date, sales });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_length() {
        let points = generate_sales_history(24, 1000.0, 10.0, 100.0, 25.0, 7);
        assert_eq!(points.len(), 24);
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = generate_sales_history(12, 500.0, 5.0, 50.0, 10.0, 42);
        let b = generate_sales_history(12, 500.0, 5.0, 50.0, 10.0, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dates_step_by_one_month() {
        let points = generate_sales_history(14, 1000.0, 0.0, 0.0, 0.0, 1);

        for window in points.windows(2) {
            assert_eq!(window[0].date + Months::new(1), window[1].date);
        }
        // Wraps into the following year
        assert_eq!(points[13].date.year(), 2021);
    }

    #[test]
    fn test_sales_never_negative() {
        // Steep downward trend would go negative without the clamp
        let points = generate_sales_history(36, 100.0, -50.0, 20.0, 10.0, 3);
        assert!(points.iter().all(|p| p.sales >= 0.0));
    }

    #[test]
    fn test_noiseless_series_is_deterministic_trend() {
        let points = generate_sales_history(3, 100.0, 10.0, 0.0, 0.0, 99);
        assert_eq!(points[0].sales, 100.0);
        assert_eq!(points[1].sales, 110.0);
        assert_eq!(points[2].sales, 120.0);
    }
}
