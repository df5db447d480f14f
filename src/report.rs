//! Plain-text rendering of a pipeline outcome.

use chrono::NaiveDate;

use forecast_sales::{ForecastOutcome, ModelKind, TimeSeries};

/// Render the outcome as a human-readable report.
pub fn render(series: &TimeSeries, outcome: &ForecastOutcome) -> String {
    let mut report = String::new();
    report.push_str("Sales Forecast Report\n");
    report.push_str("=====================\n\n");

    if let (Some(first), Some(last)) = (series.first_timestamp(), series.last_timestamp()) {
        report.push_str(&format!(
            "Observed: {} periods from {} to {}\n",
            series.len(),
            first,
            last
        ));
    }
    let total: f64 = series.values().iter().sum();
    report.push_str(&format!("Total observed sales: {}\n\n", numerize(total)));

    let model_label = match outcome.model {
        ModelKind::Seasonal => "seasonal trend (primary)",
        ModelKind::Linear => "linear trend (fallback)",
    };
    report.push_str(&format!("Model used: {}\n", model_label));

    match &outcome.metrics {
        Some(metrics) => {
            report.push_str(&format!("MAE:  {:.2}\n", metrics.mae));
            report.push_str(&format!("RMSE: {:.2}\n", metrics.rmse));
        }
        None => report.push_str("Held-out accuracy: not evaluated (no test window)\n"),
    }

    report.push_str(&format!(
        "\nForecast ({} future periods):\n",
        outcome.forecast.horizon()
    ));

    let forecast = &outcome.forecast;
    for (i, (&date, &value)) in forecast
        .timestamps()
        .iter()
        .zip(forecast.values())
        .enumerate()
    {
        let bounds = forecast.intervals().map(|iv| iv[i]);
        report.push_str(&forecast_line(date, value, bounds));
    }

    if forecast.intervals().is_none() {
        report.push_str("\nNote: the fallback model reports no uncertainty bounds.\n");
    }

    report
}

/// One forecast row: date, point estimate, bounds when the model has them.
fn forecast_line(date: NaiveDate, value: f64, bounds: Option<(f64, f64)>) -> String {
    match bounds {
        Some((lower, upper)) => format!(
            "  {}  {:>10}  [{} .. {}]\n",
            date,
            numerize(value),
            numerize(lower),
            numerize(upper)
        ),
        None => format!("  {}  {:>10}\n", date, numerize(value)),
    }
}

/// Compact rendering of a sales amount, e.g. 1_250_000 -> "1.25M".
pub fn numerize(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}
