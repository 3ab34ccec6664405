use chrono::NaiveDate;
use nextq_forecast::ForecastError;
use polars::prelude::*;
use std::io;

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);

    match forecast_error {
        ForecastError::Io(_) => {}
        other => panic!("Expected Io variant, got {:?}", other),
    }
}

#[test]
fn test_polars_error_conversion() {
    let polars_error = DataFrame::default().column("missing").unwrap_err();
    let forecast_error = ForecastError::from(polars_error);

    match forecast_error {
        ForecastError::Polars(msg) => assert!(msg.contains("missing")),
        other => panic!("Expected Polars variant, got {:?}", other),
    }
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter(
        "Changepoint sensitivity must be between 0.01 and 0.5".to_string(),
    );
    assert!(format!("{}", error).contains("between 0.01 and 0.5"));

    let error = ForecastError::MissingRegressor {
        name: "temperature".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    };
    let rendered = format!("{}", error);
    assert!(rendered.contains("temperature"));
    assert!(rendered.contains("2024-01-01"));

    let error = ForecastError::from(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "permission denied",
    ));
    let rendered = format!("{}", error);
    assert!(rendered.contains("IO error"));
    assert!(rendered.contains("permission denied"));
}

#[test]
fn test_only_empty_selection_is_recoverable() {
    assert!(ForecastError::EmptySelection.is_recoverable());
    assert!(!ForecastError::Schema("missing columns".to_string()).is_recoverable());
    assert!(!ForecastError::DataSource("no calendar".to_string()).is_recoverable());
}
