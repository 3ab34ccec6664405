use chrono::NaiveDate;
use nextq_forecast::{ForecastError, HolidayCalendar, HolidayEntry};
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "2023-12-25,Christmas Day").unwrap();
    writeln!(file, "2023-07-04,Independence Day").unwrap();
    writeln!(file, "2023-01-01,New Year's Day").unwrap();

    let calendar = HolidayCalendar::load(file.path()).unwrap();

    assert_eq!(calendar.len(), 3);
    assert_eq!(calendar.name_for(date(2023, 12, 25)), Some("Christmas Day"));
    assert!(calendar.contains(date(2023, 7, 4)));
    assert_eq!(calendar.name_for(date(2023, 7, 5)), None);

    // Entries come back date-ordered regardless of file order.
    let dates: Vec<NaiveDate> = calendar.entries().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![date(2023, 1, 1), date(2023, 7, 4), date(2023, 12, 25)]
    );
}

#[test]
fn test_missing_file_is_data_source_error() {
    let result = HolidayCalendar::load("no/such/holiday_file.csv");
    assert!(matches!(result, Err(ForecastError::DataSource(_))));
}

#[test]
fn test_unparseable_date_is_data_source_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "2023-12-25,Christmas Day").unwrap();
    writeln!(file, "not-a-date,Mystery Day").unwrap();

    let result = HolidayCalendar::load(file.path());
    match result {
        Err(ForecastError::DataSource(msg)) => assert!(msg.contains("not-a-date")),
        other => panic!("Expected DataSource error, got {:?}", other),
    }
}

#[test]
fn test_from_entries_last_wins_on_duplicate_date() {
    let calendar = HolidayCalendar::from_entries(vec![
        HolidayEntry {
            date: date(2023, 11, 11),
            name: "Veterans Day".to_string(),
        },
        HolidayEntry {
            date: date(2023, 11, 11),
            name: "Armistice Day".to_string(),
        },
    ]);

    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar.name_for(date(2023, 11, 11)), Some("Armistice Day"));
}

#[test]
fn test_cached_returns_shared_instance() {
    let first = HolidayCalendar::cached("data/us_bank_holidays.csv").unwrap();
    let second = HolidayCalendar::cached("data/us_bank_holidays.csv").unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(first.contains(date(2019, 12, 25)));
    assert!(!first.is_empty());
}
