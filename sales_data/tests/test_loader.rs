use chrono::NaiveDate;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;
use sales_data::loader::{aggregate, LoadOptions, SalesLoader};
use sales_data::{CachedLoader, DataError, Granularity};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// Helper function to create a small superstore-style export
fn create_sample_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "Row ID,Order Date,Sales").unwrap();
    writeln!(file, "1,2015-01-06,100.50").unwrap();
    writeln!(file, "2,2015-01-06,49.50").unwrap();
    writeln!(file, "3,2015-01-19,80.00").unwrap();
    writeln!(file, "4,2015-02-03,25.00").unwrap();
    writeln!(file, "5,2015-02-11,75.00").unwrap();

    file
}

#[test]
fn test_load_and_aggregate_monthly() {
    let file = create_sample_csv();

    let records = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(records.len(), 5);

    let points = aggregate(&records, Granularity::Monthly);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
    assert_eq!(points[0].sales, 230.0);
    assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2015, 2, 1).unwrap());
    assert_eq!(points[1].sales, 100.0);
}

#[test]
fn test_load_daily_keeps_one_point_per_day() {
    let file = create_sample_csv();

    let records = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap();
    let points = aggregate(&records, Granularity::Daily);

    assert_eq!(points.len(), 4);
    assert_eq!(points[0].sales, 150.0);

    for window in points.windows(2) {
        assert!(window[0].date < window[1].date);
    }
}

#[test]
fn test_unparseable_rows_are_dropped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date,Sales").unwrap();
    writeln!(file, "2015-01-06,100.0").unwrap();
    writeln!(file, "not a date,50.0").unwrap();
    writeln!(file, "2015-01-08,oops").unwrap();
    writeln!(file, "2015-01-09,75.0").unwrap();

    let records = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sales, 100.0);
    assert_eq!(records[1].sales, 75.0);
}

#[test]
fn test_negative_and_duplicate_rows_are_dropped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date,Sales").unwrap();
    writeln!(file, "2015-01-06,100.0").unwrap();
    writeln!(file, "2015-01-06,100.0").unwrap();
    writeln!(file, "2015-01-07,-20.0").unwrap();
    writeln!(file, "2015-01-08,30.0").unwrap();

    let records = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sales, 100.0);
    assert_eq!(records[1].sales, 30.0);
}

#[rstest]
#[case("2015-12-11")]
#[case("12/11/2015")]
#[case("11-12-2015")]
fn test_accepted_date_formats(#[case] raw: &str) {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date,Sales").unwrap();
    writeln!(file, "{},100.0", raw).unwrap();

    let records = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].order_date,
        NaiveDate::from_ymd_opt(2015, 12, 11).unwrap()
    );
}

#[test]
fn test_custom_column_names() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ds,y").unwrap();
    writeln!(file, "2015-01-06,100.0").unwrap();

    let options = LoadOptions {
        date_column: "ds".to_string(),
        value_column: "y".to_string(),
    };

    let records = SalesLoader::from_csv(file.path(), &options).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_missing_column_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date,Amount").unwrap();
    writeln!(file, "2015-01-06,100.0").unwrap();

    let err = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DataError::MissingColumn(name) if name == "Sales"));
}

#[test]
fn test_no_usable_rows_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date,Sales").unwrap();
    writeln!(file, "not a date,bad").unwrap();
    writeln!(file, "also bad,-1").unwrap();

    let err = SalesLoader::from_csv(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DataError::InvalidData(_)));
}

#[test]
fn test_missing_file_error() {
    let err = SalesLoader::from_csv("/nonexistent/orders.csv", &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}

#[test]
fn test_cached_loader_survives_source_changes() {
    let mut file = create_sample_csv();
    let mut loader = CachedLoader::new(LoadOptions::default());

    let first = loader.load(file.path(), Granularity::Monthly).unwrap();

    // Append another order; the cached record set should mask it
    writeln!(file, "6,2015-02-20,999.0").unwrap();
    file.flush().unwrap();

    let second = loader.load(file.path(), Granularity::Monthly).unwrap();
    assert_eq!(first, second);

    // A cleared cache sees the new row
    loader.clear();
    let third = loader.load(file.path(), Granularity::Monthly).unwrap();
    assert_eq!(third[1].sales, 1099.0);
}

#[test]
fn test_cached_loader_expires() {
    let mut file = create_sample_csv();
    let mut loader = CachedLoader::with_ttl(LoadOptions::default(), Duration::from_millis(20));

    let first = loader.load(file.path(), Granularity::Monthly).unwrap();

    writeln!(file, "6,2015-02-20,999.0").unwrap();
    file.flush().unwrap();
    std::thread::sleep(Duration::from_millis(40));

    let second = loader.load(file.path(), Granularity::Monthly).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_cached_loader_serves_both_granularities() {
    let file = create_sample_csv();
    let mut loader = CachedLoader::new(LoadOptions::default());

    let monthly = loader.load(file.path(), Granularity::Monthly).unwrap();
    let daily = loader.load(file.path(), Granularity::Daily).unwrap();

    assert_eq!(monthly.len(), 2);
    assert_eq!(daily.len(), 4);

    let monthly_total: f64 = monthly.iter().map(|p| p.sales).sum();
    let daily_total: f64 = daily.iter().map(|p| p.sales).sum();
    assert_eq!(monthly_total, daily_total);
}
