use chrono::NaiveDate;
use forecast_sales::{
    ForecastModel, ForecastPipeline, LinearTrend, ModelKind, PipelineConfig, TimeSeries,
    TrainedForecastModel,
};
use sales_data::Granularity;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Sales: Linear Fallback Example");
    println!("=======================================\n");

    // A store with perfectly steady sales: the seasonal model has nothing
    // to decompose and declines the series
    println!("Creating a flat sales history...");
    let series = flat_monthly_series(18, 5_000.0);
    println!("Sample data created: {} identical monthly points\n", series.len());

    let config = PipelineConfig {
        horizon: 4,
        test_window_months: 3,
        granularity: Granularity::Monthly,
        ..PipelineConfig::default()
    };

    println!("Running the forecasting pipeline...");
    let outcome = ForecastPipeline::new(config)?.run(&series)?;

    match outcome.model {
        ModelKind::Linear => println!("The pipeline fell back to the linear trend\n"),
        ModelKind::Seasonal => println!("The seasonal model fitted after all\n"),
    }

    if let Some(metrics) = &outcome.metrics {
        println!("Held-out accuracy: MAE {:.2}, RMSE {:.2}", metrics.mae, metrics.rmse);
    }

    println!("\nForecast for the next 4 months:");
    for (ts, value) in outcome
        .forecast
        .timestamps()
        .iter()
        .zip(outcome.forecast.values())
    {
        println!("  {}: {:.2}", ts, value);
    }

    if !outcome.forecast.has_uncertainty() {
        println!("\nNote: the linear fallback carries no uncertainty bounds");
    }

    // The fallback family can also be used on its own
    println!("\nTraining the linear trend directly on a short history...");
    let short = TimeSeries::new(
        monthly_dates(2023, 1, 5),
        vec![900.0, 1_000.0, 1_100.0, 1_200.0, 1_300.0],
    )?;

    let trained = LinearTrend::new(Granularity::Monthly).train(&short)?;
    let forecast = trained.forecast(2)?;
    println!(
        "Direct linear forecast: {:?} at {:?}",
        forecast.values(),
        forecast.timestamps()
    );

    println!("\nSummary:");
    println!("1. Zero-variance data disqualifies the seasonal model up front");
    println!("2. The pipeline downgrades to the linear trend exactly once");
    println!("3. Fallback forecasts still get evaluated on the held-out window");
    println!("4. Only the seasonal model quantifies its own uncertainty");

    Ok(())
}

/// Build a monthly series holding the same value throughout
fn flat_monthly_series(months: usize, level: f64) -> TimeSeries {
    TimeSeries::new(monthly_dates(2022, 1, months), vec![level; months]).unwrap()
}

/// Consecutive first-of-month dates starting at the given year and month
fn monthly_dates(year: i32, month: u32, count: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    (0..count)
        .map(|i| start + chrono::Months::new(i as u32))
        .collect()
}
