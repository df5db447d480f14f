//! CSV ingestion, cleaning and aggregation of raw sales orders

use crate::{DataError, Granularity, Result, SalesPoint, SalesRecord};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

/// Date formats accepted for the order-date column
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Column selection for CSV ingestion
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Name of the order-date column
    pub date_column: String,
    /// Name of the sales-amount column
    pub value_column: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            date_column: "Order Date".to_string(),
            value_column: "Sales".to_string(),
        }
    }
}

/// Loader for raw sales order data
#[derive(Debug)]
pub struct SalesLoader;

impl SalesLoader {
    /// Load and clean sales records from a CSV file
    ///
    /// Rows whose date cannot be parsed or whose amount is missing,
    /// non-finite or negative are dropped, as are exact duplicate rows.
    /// An input that cleans down to zero rows is an error.
    pub fn from_csv<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<SalesRecord>> {
        let file = File::open(path)?;
        // Use polars DataFrame reader directly
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(&df, options)
    }

    /// Clean sales records out of an existing DataFrame
    pub fn from_dataframe(df: &DataFrame, options: &LoadOptions) -> Result<Vec<SalesRecord>> {
        let dates = Self::column_as_dates(df, &options.date_column)?;
        let values = Self::column_as_values(df, &options.value_column)?;

        let total_rows = df.height();
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(total_rows);

        for (date, value) in dates.into_iter().zip(values) {
            let (order_date, sales) = match (date, value) {
                (Some(d), Some(v)) if v.is_finite() && v >= 0.0 => (d, v),
                _ => continue,
            };

            // Exact duplicate rows collapse to their first occurrence
            if seen.insert((order_date, sales.to_bits())) {
                records.push(SalesRecord { order_date, sales });
            }
        }

        if records.is_empty() {
            return Err(DataError::InvalidData(
                "no usable rows after cleaning".to_string(),
            ));
        }

        tracing::debug!(
            rows = total_rows,
            kept = records.len(),
            dropped = total_rows - records.len(),
            "cleaned sales records"
        );

        Ok(records)
    }

    /// Extract the order-date column, preserving row alignment
    ///
    /// Unparseable entries come back as `None` so the caller can drop the
    /// whole row rather than shifting values against dates.
    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let col = df
            .column(column_name)
            .map_err(|_| DataError::MissingColumn(column_name.to_string()))?;

        match col.dtype() {
            DataType::Utf8 => Ok(col
                .utf8()
                .unwrap()
                .into_iter()
                .map(|opt| opt.and_then(parse_date))
                .collect()),
            DataType::Date => Ok(col
                .date()
                .unwrap()
                .into_iter()
                .map(|opt| opt.and_then(date_from_epoch_days))
                .collect()),
            _ => Err(DataError::InvalidData(format!(
                "Column '{}' cannot be read as dates",
                column_name
            ))),
        }
    }

    /// Extract the sales column, preserving row alignment
    fn column_as_values(df: &DataFrame, column_name: &str) -> Result<Vec<Option<f64>>> {
        let col = df
            .column(column_name)
            .map_err(|_| DataError::MissingColumn(column_name.to_string()))?;

        match col.dtype() {
            DataType::Float64 => Ok(col.f64().unwrap().into_iter().collect()),
            DataType::Float32 => Ok(col
                .f32()
                .unwrap()
                .into_iter()
                .map(|opt| opt.map(|v| v as f64))
                .collect()),
            DataType::Int64 => Ok(col
                .i64()
                .unwrap()
                .into_iter()
                .map(|opt| opt.map(|v| v as f64))
                .collect()),
            DataType::Int32 => Ok(col
                .i32()
                .unwrap()
                .into_iter()
                .map(|opt| opt.map(|v| v as f64))
                .collect()),
            DataType::UInt64 => Ok(col
                .u64()
                .unwrap()
                .into_iter()
                .map(|opt| opt.map(|v| v as f64))
                .collect()),
            DataType::UInt32 => Ok(col
                .u32()
                .unwrap()
                .into_iter()
                .map(|opt| opt.map(|v| v as f64))
                .collect()),
            DataType::Utf8 => Ok(col
                .utf8()
                .unwrap()
                .into_iter()
                .map(|opt| opt.and_then(|s| s.trim().parse::<f64>().ok()))
                .collect()),
            _ => Err(DataError::InvalidData(format!(
                "Column '{}' cannot be converted to f64",
                column_name
            ))),
        }
    }
}

/// Parse a date string against the accepted formats
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Convert polars' days-since-epoch date representation
fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(days as i64))
}

/// Sum sales per period, one point per distinct timestamp, ascending
///
/// Daily data is keyed to the order date itself; monthly data to the first
/// day of the calendar month.
pub fn aggregate(records: &[SalesRecord], granularity: Granularity) -> Vec<SalesPoint> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in records {
        let key = match granularity {
            Granularity::Daily => record.order_date,
            Granularity::Monthly => month_start(record.order_date),
        };
        *totals.entry(key).or_insert(0.0) += record.sales;
    }

    totals
        .into_iter()
        .map(|(date, sales)| SalesPoint { date, sales })
        .collect()
}

/// First day of the month containing `date`
fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, sales: f64) -> SalesRecord {
        SalesRecord {
            order_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            sales,
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2015, 12, 11).unwrap();
        assert_eq!(parse_date("2015-12-11"), Some(expected));
        assert_eq!(parse_date("12/11/2015"), Some(expected));
        assert_eq!(parse_date("11-12-2015"), Some(expected));
        assert_eq!(parse_date("  2015-12-11  "), Some(expected));
        assert_eq!(parse_date("eleventh of December"), None);
    }

    #[test]
    fn test_aggregate_daily_sums_per_day() {
        let records = vec![
            record(2015, 1, 6, 100.0),
            record(2015, 1, 6, 50.0),
            record(2015, 1, 7, 25.0),
        ];

        let points = aggregate(&records, Granularity::Daily);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].sales, 150.0);
        assert_eq!(points[1].sales, 25.0);
    }

    #[test]
    fn test_aggregate_monthly_keys_to_month_start() {
        let records = vec![
            record(2015, 1, 6, 100.0),
            record(2015, 1, 28, 50.0),
            record(2015, 2, 3, 25.0),
        ];

        let points = aggregate(&records, Granularity::Monthly);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(points[0].sales, 150.0);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2015, 2, 1).unwrap());
        assert_eq!(points[1].sales, 25.0);
    }

    #[test]
    fn test_aggregate_orders_ascending() {
        let records = vec![
            record(2015, 3, 1, 1.0),
            record(2015, 1, 1, 2.0),
            record(2015, 2, 1, 3.0),
        ];

        let points = aggregate(&records, Granularity::Daily);
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_aggregate_empty_records() {
        assert!(aggregate(&[], Granularity::Monthly).is_empty());
    }
}
