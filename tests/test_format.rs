use chrono::NaiveDate;
use nextq_forecast::{ForecastResult, ForecastTable, OverlaySeries, Selection};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn known(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn sample_result() -> ForecastResult {
    ForecastResult::new(
        vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)],
        vec![10.0, 11.5, 9.25],
    )
    .unwrap()
}

#[test]
fn test_all_selection_has_no_labels() {
    let table = ForecastTable::build(
        &sample_result(),
        &Selection::All,
        &Selection::All,
        &known(&["1", "2"]),
        &known(&["101"]),
    );

    assert_eq!(table.store_label(), None);
    assert_eq!(table.item_label(), None);
    assert_eq!(table.column_names(), vec!["Date", "Forecasted Sales"]);
    assert_eq!(table.len(), 3);
}

#[test]
fn test_strict_subset_prepends_labels() {
    let table = ForecastTable::build(
        &sample_result(),
        &Selection::subset(["2"]),
        &Selection::All,
        &known(&["1", "2"]),
        &known(&["101", "102"]),
    );

    assert_eq!(table.store_label(), Some("2"));
    // The untouched dimension is labeled with every known identifier.
    assert_eq!(table.item_label(), Some("101, 102"));
    assert_eq!(
        table.column_names(),
        vec!["Store", "Item", "Date", "Forecasted Sales"]
    );
}

#[test]
fn test_subset_naming_everything_is_not_annotated() {
    let table = ForecastTable::build(
        &sample_result(),
        &Selection::subset(["1", "2"]),
        &Selection::All,
        &known(&["1", "2"]),
        &known(&["101"]),
    );

    assert_eq!(table.store_label(), None);
    assert_eq!(table.column_names(), vec!["Date", "Forecasted Sales"]);
}

#[test]
fn test_rows_preserve_ascending_date_order() {
    let table = ForecastTable::build(
        &sample_result(),
        &Selection::All,
        &Selection::All,
        &known(&["1"]),
        &known(&["101"]),
    );

    let dates: Vec<NaiveDate> = table.rows().iter().map(|(d, _)| *d).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_to_dataframe_column_order() {
    let table = ForecastTable::build(
        &sample_result(),
        &Selection::subset(["1"]),
        &Selection::subset(["101"]),
        &known(&["1", "2"]),
        &known(&["101", "102"]),
    );

    let df = table.to_dataframe().unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(
        df.get_column_names(),
        vec!["Store", "Item", "Date", "Forecasted Sales"]
    );
}

#[test]
fn test_write_csv_includes_header_and_rows() {
    let table = ForecastTable::build(
        &sample_result(),
        &Selection::subset(["2"]),
        &Selection::All,
        &known(&["1", "2"]),
        &known(&["101"]),
    );

    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Store,Item,Date,Forecasted Sales");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2,101,2024-01-01,"));
}

#[test]
fn test_overlay_pairs_history_with_forecast() {
    let result = sample_result();
    let history = vec![
        (date(2023, 12, 30), 8.0),
        (date(2023, 12, 31), 9.0),
    ];

    // OverlaySeries::new takes the aggregated series; emulate via the full
    // pipeline types in integration tests. Here check the shape directly.
    let overlay = OverlaySeries {
        actual: history.clone(),
        forecast: result.points().collect(),
    };

    assert_eq!(overlay.actual, history);
    assert_eq!(overlay.forecast.len(), 3);
    assert_eq!(overlay.forecast[0], (date(2024, 1, 1), 10.0));
}
