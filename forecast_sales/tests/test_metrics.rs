use assert_approx_eq::assert_approx_eq;
use forecast_sales::{evaluate_forecast, ForecastError};
use rstest::rstest;

#[test]
fn test_perfect_forecast_scores_zero() {
    let metrics = evaluate_forecast(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();

    assert_eq!(metrics.mae, 0.0);
    assert_eq!(metrics.rmse, 0.0);
}

#[test]
fn test_constant_offset_scores_one() {
    let metrics = evaluate_forecast(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]).unwrap();

    assert_eq!(metrics.mae, 1.0);
    assert_eq!(metrics.rmse, 1.0);
}

#[test]
fn test_mixed_errors() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let metrics = evaluate_forecast(&actual, &predicted).unwrap();

    // Absolute errors are [2, 2, 3, 3, 2]
    assert_approx_eq!(metrics.mae, 2.4, 1e-10);
    assert_approx_eq!(metrics.rmse, 6.0_f64.sqrt(), 1e-10);
}

#[test]
fn test_rmse_weighs_outliers_more_than_mae() {
    let actual = vec![100.0, 100.0, 100.0, 100.0];
    let predicted = vec![100.0, 100.0, 100.0, 120.0];

    let metrics = evaluate_forecast(&actual, &predicted).unwrap();
    assert!(metrics.rmse > metrics.mae);
}

#[test]
fn test_no_internal_rounding() {
    // A third stays a third; formatting belongs to the display layer
    let metrics = evaluate_forecast(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();

    assert_eq!(metrics.mae, 1.0 / 3.0);
    assert_eq!(metrics.rmse, (1.0 / 3.0_f64).sqrt());
}

#[rstest]
#[case(vec![1.0, 2.0, 3.0], vec![1.0, 2.0])]
#[case(vec![1.0], vec![])]
#[case(vec![], vec![])]
fn test_length_mismatch_and_empty_inputs(#[case] actual: Vec<f64>, #[case] predicted: Vec<f64>) {
    let err = evaluate_forecast(&actual, &predicted).unwrap_err();
    assert!(matches!(err, ForecastError::DimensionMismatch(_)));
}

#[test]
fn test_single_point_is_enough() {
    let metrics = evaluate_forecast(&[5.0], &[7.5]).unwrap();

    assert_eq!(metrics.mae, 2.5);
    assert_eq!(metrics.rmse, 2.5);
}

#[test]
fn test_display_names_both_metrics() {
    let metrics = evaluate_forecast(&[1.0, 2.0], &[2.0, 3.0]).unwrap();
    let rendered = format!("{}", metrics);

    assert!(rendered.contains("MAE"));
    assert!(rendered.contains("RMSE"));
    assert!(rendered.contains("1.0000"));
}

#[test]
fn test_metrics_serialize_to_json() {
    let metrics = evaluate_forecast(&[1.0, 2.0], &[2.0, 4.0]).unwrap();
    let json = serde_json::to_string(&metrics).unwrap();

    assert!(json.contains("\"mae\":1.5"));
    assert!(json.contains("\"rmse\""));
}
