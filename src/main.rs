mod cli;
mod logging;
mod report;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use forecast_sales::{ForecastPipeline, TimeSeries};
use sales_data::loader::{aggregate, SalesLoader};

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // 1. Load and clean the order export
    let records = SalesLoader::from_csv(&cli.input, &cli.load_options())
        .with_context(|| format!("failed to load sales data: {}", cli.input.display()))?;
    info!(records = records.len(), "sales records loaded");

    // 2. Aggregate to one value per period
    let points = aggregate(&records, cli.granularity);
    let series = TimeSeries::from_sales_points(&points)
        .context("aggregated sales do not form a valid series")?;
    info!(
        points = series.len(),
        granularity = %cli.granularity,
        "series aggregated"
    );

    // 3. Split, fit, evaluate, forecast
    let pipeline = ForecastPipeline::new(cli.pipeline_config())
        .context("invalid forecasting configuration")?;
    let outcome = pipeline.run(&series).context("forecasting failed")?;

    // 4. Render the outcome
    if cli.json {
        println!("{}", outcome.to_json()?);
    } else {
        print!("{}", report::render(&series, &outcome));
    }

    Ok(())
}
