use chrono::NaiveDate;
use nextq_forecast::{ExternalVariables, ForecastError};
use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_table() -> ExternalVariables {
    let df = DataFrame::new(vec![
        Series::new("date", vec!["2023-01-01", "2023-01-02", "2023-01-03"]),
        Series::new("temperature", vec![3.5f64, 4.0, -1.0]),
        Series::new("promo_budget", vec![100i64, 0, 250]),
    ])
    .unwrap();
    ExternalVariables::from_dataframe(df).unwrap()
}

#[test]
fn test_candidates_in_upload_order() {
    let external = sample_table();
    assert_eq!(external.candidates(), &["temperature", "promo_budget"]);
    assert!(external.has_candidate("temperature"));
    assert!(!external.has_candidate("date"));
}

#[test]
fn test_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,fuel_price").unwrap();
    writeln!(file, "2023-06-01,3.79").unwrap();
    writeln!(file, "2023-06-02,3.85").unwrap();

    let external = ExternalVariables::from_csv(file.path()).unwrap();

    assert_eq!(external.candidates(), &["fuel_price"]);
    assert_eq!(external.value("fuel_price", date(2023, 6, 2)), Some(3.85));
}

#[test]
fn test_duplicate_dates_are_schema_error() {
    let df = DataFrame::new(vec![
        Series::new("date", vec!["2023-01-01", "2023-01-01"]),
        Series::new("temperature", vec![3.5f64, 4.0]),
    ])
    .unwrap();

    match ExternalVariables::from_dataframe(df) {
        Err(ForecastError::Schema(msg)) => assert!(msg.contains("2023-01-01")),
        other => panic!("Expected Schema error, got {:?}", other),
    }
}

#[test]
fn test_missing_date_column_is_schema_error() {
    let df = DataFrame::new(vec![Series::new("temperature", vec![3.5f64])]).unwrap();

    assert!(matches!(
        ExternalVariables::from_dataframe(df),
        Err(ForecastError::Schema(_))
    ));
}

#[test]
fn test_values_for_aligns_with_dates() {
    let external = sample_table();
    let dates = vec![date(2023, 1, 3), date(2023, 1, 1)];

    let values = external.values_for("temperature", &dates).unwrap();
    assert_eq!(values, vec![-1.0, 3.5]);

    let promo = external.values_for("promo_budget", &dates).unwrap();
    assert_eq!(promo, vec![250.0, 100.0]);
}

#[test]
fn test_uncovered_date_is_missing_regressor_error() {
    let external = sample_table();
    let dates = vec![date(2023, 1, 2), date(2023, 1, 4)];

    match external.values_for("temperature", &dates) {
        Err(ForecastError::MissingRegressor { name, date: d }) => {
            assert_eq!(name, "temperature");
            assert_eq!(d, date(2023, 1, 4));
        }
        other => panic!("Expected MissingRegressor error, got {:?}", other),
    }
}

#[test]
fn test_unknown_regressor_name_is_schema_error() {
    let external = sample_table();

    match external.values_for("rainfall", &[date(2023, 1, 1)]) {
        Err(ForecastError::Schema(msg)) => assert!(msg.contains("rainfall")),
        other => panic!("Expected Schema error, got {:?}", other),
    }
}
