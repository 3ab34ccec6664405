use chrono::{Datelike, NaiveDate, Weekday};
use nextq_forecast::model::SeasonalBaseline;
use nextq_forecast::utils::{q1_date_range, year_date_range};
use nextq_forecast::{
    filter_and_aggregate, ExternalVariables, ForecastConfig, ForecastError, ForecastModel,
    ForecastResult, HolidayCalendar, SalesRecord, SalesTable, Selection, TrainedForecastModel,
};
use polars::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Weekends sell double in this fixture.
fn weekend_heavy_request(
    config: ForecastConfig,
    external: Option<&ExternalVariables>,
) -> nextq_forecast::ForecastRequest {
    let records: Vec<SalesRecord> = year_date_range(2023)
        .into_iter()
        .map(|d| {
            let sales = match d.weekday() {
                Weekday::Sat | Weekday::Sun => 20.0,
                _ => 10.0,
            };
            SalesRecord {
                date: d,
                store: "1".to_string(),
                item: "101".to_string(),
                sales,
            }
        })
        .collect();
    let normalized = SalesTable::from_records(records)
        .normalize(&HolidayCalendar::from_entries(Vec::new()))
        .unwrap();
    let series = filter_and_aggregate(&normalized, &Selection::All, &Selection::All).unwrap();
    config.build_request(&normalized, &series, external).unwrap()
}

#[test]
fn test_forecast_result_rejects_misaligned_lengths() {
    let result = ForecastResult::new(vec![date(2024, 1, 1)], vec![1.0, 2.0]);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_baseline_learns_weekday_profile() {
    let request = weekend_heavy_request(ForecastConfig::default(), None);

    let trained = SeasonalBaseline::new()
        .fit(&request.config, &request.training)
        .unwrap();
    let result = trained.predict(&request.future).unwrap();

    assert_eq!(result.len(), 91);
    for (d, value) in result.points() {
        let expected = match d.weekday() {
            Weekday::Sat | Weekday::Sun => 20.0,
            _ => 10.0,
        };
        assert!((value - expected).abs() < 1e-9, "{}: {}", d, value);
    }
}

#[test]
fn test_baseline_predict_requires_registered_regressors() {
    let coverage: Vec<NaiveDate> = year_date_range(2023)
        .into_iter()
        .chain(q1_date_range(2024))
        .collect();
    let date_strings: Vec<String> = coverage
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let values: Vec<f64> = (0..coverage.len()).map(|i| i as f64).collect();
    let df = DataFrame::new(vec![
        Series::new("date", date_strings),
        Series::new("temperature", values),
    ])
    .unwrap();
    let external = ExternalVariables::from_dataframe(df).unwrap();

    let with_regressor = weekend_heavy_request(
        ForecastConfig::default().with_regressors(["temperature"]),
        Some(&external),
    );
    let plain = weekend_heavy_request(ForecastConfig::default(), None);

    let trained = SeasonalBaseline::new()
        .fit(&with_regressor.config, &with_regressor.training)
        .unwrap();

    // Predicting over a frame that lacks the registered column must fail
    // rather than silently ignore the regressor.
    match trained.predict(&plain.future) {
        Err(ForecastError::MissingRegressor { name, .. }) => {
            assert_eq!(name, "temperature");
        }
        other => panic!("Expected MissingRegressor error, got {:?}", other),
    }

    // The aligned frame predicts fine.
    assert!(trained.predict(&with_regressor.future).is_ok());
}

#[test]
fn test_model_names() {
    let model = SeasonalBaseline::new();
    assert!(model.name().contains("baseline"));
}
