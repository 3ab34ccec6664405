//! Uploaded sales data: parsing, validation, and normalization
//!
//! The uploaded table must carry `date`, `store`, `item` and `sales` columns.
//! Optional `year`/`month`/`day`/`weekday` columns are tolerated for manual
//! inspection but ignored here: month and weekday are always re-derived from
//! `date` so the encoded features can never disagree with the calendar.

use crate::error::{ForecastError, Result};
use crate::holidays::HolidayCalendar;
use crate::utils::parse_date;
use chrono::{Datelike, Duration, NaiveDate};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

/// Columns every sales upload must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["date", "store", "item", "sales"];

/// One uploaded sales row.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the sale
    pub date: NaiveDate,
    /// Store identifier
    pub store: String,
    /// Item identifier
    pub item: String,
    /// Quantity sold
    pub sales: f64,
}

/// Parsed and schema-validated sales upload.
#[derive(Debug, Clone)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Load a sales upload from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Validate an existing DataFrame and extract typed records.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let column_names = df.get_column_names();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !column_names.contains(required))
            .collect();
        if !missing.is_empty() {
            return Err(ForecastError::Schema(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let dates = column_as_dates(&df, "date")?;
        let stores = column_as_labels(&df, "store")?;
        let items = column_as_labels(&df, "item")?;
        let sales = column_as_f64(&df, "sales")?;

        let records = dates
            .into_iter()
            .zip(stores)
            .zip(items)
            .zip(sales)
            .map(|(((date, store), item), sales)| SalesRecord {
                date,
                store,
                item,
                sales,
            })
            .collect();

        Ok(Self { records })
    }

    /// Build a table from already-typed records (demos, tests).
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// The parsed records, in upload order.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Number of uploaded rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the upload holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize the upload into the training base frame.
    ///
    /// Restricts the working set to the most recent year present (older
    /// years are discarded as a deliberate training-history policy), merges
    /// holiday flags, and derives drop-first indicator columns for month,
    /// holiday name and weekday. The receiver is consumed; nothing upstream
    /// is mutated.
    pub fn normalize(self, holidays: &HolidayCalendar) -> Result<NormalizedSales> {
        let latest_year = self
            .records
            .iter()
            .map(|r| r.date.year())
            .max()
            .ok_or_else(|| ForecastError::Schema("Sales upload holds no rows".to_string()))?;
        let next_year = latest_year + 1;

        let records: Vec<SalesRecord> = self
            .records
            .into_iter()
            .filter(|r| r.date.year() == latest_year)
            .collect();

        let features = DateFeatures::derive(&records, holidays);

        Ok(NormalizedSales {
            records,
            latest_year,
            next_year,
            features,
        })
    }
}

/// Sales restricted to the latest year, with per-date encoded features.
#[derive(Debug, Clone)]
pub struct NormalizedSales {
    records: Vec<SalesRecord>,
    latest_year: i32,
    next_year: i32,
    features: DateFeatures,
}

impl NormalizedSales {
    /// Retained records (latest year only).
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// The most recent year present in the upload; the training history.
    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    /// The year being forecast.
    pub fn next_year(&self) -> i32 {
        self.next_year
    }

    /// Encoded per-date feature table.
    pub fn features(&self) -> &DateFeatures {
        &self.features
    }

    /// Distinct store identifiers, ordered.
    pub fn stores(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.store.clone()).collect()
    }

    /// Distinct item identifiers, ordered.
    pub fn items(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.item.clone()).collect()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records survived the year restriction.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-date feature table: holiday flag plus drop-first indicator columns.
///
/// Every feature is a pure function of the calendar date, so the table is
/// keyed by date and survives aggregation across stores and items unchanged.
/// Indicator levels are ordered (months and weekdays in calendar order,
/// holiday names lexically) and the first observed level of each category is
/// omitted as the baseline, leaving k-1 indicators for k observed levels.
#[derive(Debug, Clone)]
pub struct DateFeatures {
    names: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<i32>>,
}

impl DateFeatures {
    fn derive(records: &[SalesRecord], holidays: &HolidayCalendar) -> Self {
        let dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();

        let month_levels: Vec<u32> = {
            let observed: BTreeSet<u32> = dates.iter().map(|d| d.month()).collect();
            observed.into_iter().collect()
        };
        let weekday_levels: Vec<String> = {
            let observed: BTreeSet<u32> =
                dates.iter().map(|d| d.weekday().number_from_monday()).collect();
            observed
                .into_iter()
                .map(|n| weekday_name(n).to_string())
                .collect()
        };
        let holiday_levels: Vec<String> = {
            let observed: BTreeSet<String> = dates
                .iter()
                .filter_map(|d| holidays.name_for(*d).map(str::to_string))
                .collect();
            observed.into_iter().collect()
        };

        // Drop-first: skip each category's first observed level as baseline.
        let mut names = vec!["holiday_bool".to_string()];
        names.extend(month_levels.iter().skip(1).map(|m| format!("month_{}", m)));
        names.extend(
            holiday_levels
                .iter()
                .skip(1)
                .map(|h| format!("holiday_{}", h)),
        );
        names.extend(
            weekday_levels
                .iter()
                .skip(1)
                .map(|w| format!("weekday_{}", w)),
        );

        let mut rows = BTreeMap::new();
        for date in dates {
            let holiday_name = holidays.name_for(date);
            let mut row = Vec::with_capacity(names.len());
            row.push(i32::from(holiday_name.is_some()));
            for level in month_levels.iter().skip(1) {
                row.push(i32::from(date.month() == *level));
            }
            for level in holiday_levels.iter().skip(1) {
                row.push(i32::from(holiday_name == Some(level.as_str())));
            }
            for level in weekday_levels.iter().skip(1) {
                row.push(i32::from(
                    weekday_name(date.weekday().number_from_monday()) == level.as_str(),
                ));
            }
            rows.insert(date, row);
        }

        Self { names, rows }
    }

    /// Feature column names; `holiday_bool` first, then indicators.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Feature row for a date, aligned with `names()`.
    pub fn row(&self, date: NaiveDate) -> Option<&[i32]> {
        self.rows.get(&date).map(Vec::as_slice)
    }

    /// Single feature value for a date.
    pub fn value(&self, date: NaiveDate, name: &str) -> Option<i32> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.rows.get(&date).map(|row| row[idx])
    }

    /// Number of dates covered by the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table covers no dates.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn weekday_name(number_from_monday: u32) -> &'static str {
    match number_from_monday {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Sunday",
    }
}

/// Extract a column as calendar dates, accepting ISO strings or a native
/// date dtype.
pub(crate) fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
    let col = df.column(column_name)?;

    match col.dtype() {
        DataType::Utf8 => col
            .utf8()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| match opt {
                Some(value) => parse_date(value),
                None => Err(ForecastError::Schema(format!(
                    "Null value in '{}' column",
                    column_name
                ))),
            })
            .collect(),
        DataType::Date => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch");
            col.date()
                .map_err(ForecastError::from)?
                .into_iter()
                .map(|opt| match opt {
                    Some(days) => Ok(epoch + Duration::days(i64::from(days))),
                    None => Err(ForecastError::Schema(format!(
                        "Null value in '{}' column",
                        column_name
                    ))),
                })
                .collect()
        }
        other => Err(ForecastError::Schema(format!(
            "Column '{}' has unsupported dtype {} for dates",
            column_name, other
        ))),
    }
}

/// Extract a column as identifier strings, accepting string or integer ids.
pub(crate) fn column_as_labels(df: &DataFrame, column_name: &str) -> Result<Vec<String>> {
    let col = df.column(column_name)?;

    let null_err = || ForecastError::Schema(format!("Null value in '{}' column", column_name));

    match col.dtype() {
        DataType::Utf8 => col
            .utf8()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(str::to_string).ok_or_else(null_err))
            .collect(),
        DataType::Int64 => col
            .i64()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(|v| v.to_string()).ok_or_else(null_err))
            .collect(),
        DataType::Int32 => col
            .i32()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(|v| v.to_string()).ok_or_else(null_err))
            .collect(),
        other => Err(ForecastError::Schema(format!(
            "Column '{}' has unsupported dtype {} for identifiers",
            column_name, other
        ))),
    }
}

/// Extract a numeric column as f64 values, erroring on nulls so rows never
/// silently fall out of alignment.
pub(crate) fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
    let col = df.column(column_name)?;

    let null_err = || ForecastError::Schema(format!("Null value in '{}' column", column_name));

    match col.dtype() {
        DataType::Float64 => col
            .f64()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.ok_or_else(null_err))
            .collect(),
        DataType::Float32 => col
            .f32()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(f64::from).ok_or_else(null_err))
            .collect(),
        DataType::Int64 => col
            .i64()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(|v| v as f64).ok_or_else(null_err))
            .collect(),
        DataType::Int32 => col
            .i32()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(f64::from).ok_or_else(null_err))
            .collect(),
        DataType::UInt64 => col
            .u64()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(|v| v as f64).ok_or_else(null_err))
            .collect(),
        DataType::UInt32 => col
            .u32()
            .map_err(ForecastError::from)?
            .into_iter()
            .map(|opt| opt.map(f64::from).ok_or_else(null_err))
            .collect(),
        other => Err(ForecastError::Schema(format!(
            "Column '{}' has unsupported dtype {} for numeric values",
            column_name, other
        ))),
    }
}
