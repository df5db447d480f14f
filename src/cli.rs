use std::path::PathBuf;

use clap::Parser;

use forecast_sales::{PipelineConfig, SeasonalityMode};
use sales_data::loader::LoadOptions;
use sales_data::Granularity;

/// Salescast batch sales forecaster.
#[derive(Parser)]
#[command(
    name = "salescast",
    version,
    about = "Forecast future sales from a historical order export"
)]
pub struct Cli {
    /// Path to the sales order CSV export.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of future periods to forecast.
    #[arg(long, default_value_t = 30)]
    pub horizon: usize,

    /// Trailing months held out for evaluation (0 skips evaluation).
    #[arg(long, default_value_t = 3)]
    pub test_window_months: u32,

    /// Seasonality mode of the primary model (additive|multiplicative).
    #[arg(long, default_value = "additive")]
    pub seasonality: SeasonalityMode,

    /// Aggregation grain of the series (daily|monthly).
    #[arg(short, long, default_value = "daily")]
    pub granularity: Granularity,

    /// Confidence level behind the uncertainty bounds.
    #[arg(long, default_value_t = 0.95)]
    pub confidence_level: f64,

    /// Name of the order-date column in the export.
    #[arg(long, default_value = "Order Date")]
    pub date_column: String,

    /// Name of the sales-amount column in the export.
    #[arg(long, default_value = "Sales")]
    pub value_column: String,

    /// Emit the outcome as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Column selection for the loading stage.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            date_column: self.date_column.clone(),
            value_column: self.value_column.clone(),
        }
    }

    /// Forecasting configuration from the parsed flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            horizon: self.horizon,
            test_window_months: self.test_window_months,
            seasonality_mode: self.seasonality,
            granularity: self.granularity,
            confidence_level: self.confidence_level,
        }
    }
}
