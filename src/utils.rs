//! Utility functions for the nextq_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Parse an ISO (`YYYY-MM-DD`) calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ForecastError::Schema(format!("Unparseable date '{}': {}", value, e)))
}

/// Daily date range from `start` through `end`, both inclusive.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

/// The Q1 forecast window for a year: January 1 through March 31, daily.
pub fn q1_date_range(year: i32) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid Q1 start");
    let end = NaiveDate::from_ymd_opt(year, 3, 31).expect("valid Q1 end");
    date_range(start, end)
}

/// All days of a calendar year.
pub fn year_date_range(year: i32) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
    let end = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");
    date_range(start, end)
}

/// Generate a year of synthetic daily sales history for the cartesian product
/// of the given stores and items.
///
/// Each (store, item) pair gets its own base level around `base_sales`, with
/// Gaussian day-to-day noise and a mild weekend lift. Values are clamped at
/// zero so quantities stay non-negative. Intended for demos and tests.
pub fn generate_sales_history(
    stores: &[&str],
    items: &[&str],
    year: i32,
    base_sales: f64,
    noise: f64,
) -> Vec<crate::data::SalesRecord> {
    let mut rng = rand::thread_rng();
    let noise_dist = Normal::new(0.0, noise.max(0.0)).unwrap_or_else(|_| {
        Normal::new(0.0, 1.0).expect("unit normal")
    });

    let mut records = Vec::new();
    for store in stores {
        for item in items {
            let level = base_sales * rng.gen_range(0.8..1.2);
            for date in year_date_range(year) {
                let weekend_lift = match date.weekday().number_from_monday() {
                    6 | 7 => 1.15,
                    _ => 1.0,
                };
                let value = (level * weekend_lift + noise_dist.sample(&mut rng)).max(0.0);
                records.push(crate::data::SalesRecord {
                    date,
                    store: (*store).to_string(),
                    item: (*item).to_string(),
                    sales: value,
                });
            }
        }
    }
    records
}
