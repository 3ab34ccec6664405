//! Optional external regressor variables, keyed by date
//!
//! A second upload may supply arbitrary named numeric columns alongside a
//! `date` column. Every non-date column is a candidate regressor; the user
//! picks a subset, and picked columns must then cover every historical and
//! future date the model touches.

use crate::data::{column_as_dates, column_as_f64};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Parsed external variable table.
#[derive(Debug, Clone)]
pub struct ExternalVariables {
    /// Candidate column names, in upload order
    names: Vec<String>,
    /// Per-column date-keyed values
    columns: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl ExternalVariables {
    /// Load an external variable table from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Validate an existing DataFrame and index its columns by date.
    ///
    /// Duplicate dates are rejected outright: silently keeping the first or
    /// last match would make regressor values depend on row order.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        if !df.get_column_names().contains(&"date") {
            return Err(ForecastError::Schema(
                "External variable table is missing the 'date' column".to_string(),
            ));
        }

        let dates = column_as_dates(&df, "date")?;
        {
            let mut seen = std::collections::BTreeSet::new();
            for date in &dates {
                if !seen.insert(*date) {
                    return Err(ForecastError::Schema(format!(
                        "Duplicate date {} in external variable table",
                        date
                    )));
                }
            }
        }

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .copied()
            .filter(|name| *name != "date")
            .map(|name| name.to_string())
            .collect();

        let mut columns = BTreeMap::new();
        for name in &names {
            let values = column_as_f64(&df, name)?;
            let by_date: BTreeMap<NaiveDate, f64> =
                dates.iter().copied().zip(values).collect();
            columns.insert(name.clone(), by_date);
        }

        Ok(Self { names, columns })
    }

    /// Candidate regressor names, in upload order.
    pub fn candidates(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is a candidate regressor.
    pub fn has_candidate(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// The value of `name` on a single date, if covered.
    pub fn value(&self, name: &str, date: NaiveDate) -> Option<f64> {
        self.columns.get(name).and_then(|col| col.get(&date)).copied()
    }

    /// Align a regressor onto a date sequence.
    ///
    /// Fails with `Schema` when `name` is not a candidate, and with
    /// `MissingRegressor` naming the first uncovered date otherwise. Both
    /// checks run before any frame reaches the model.
    pub fn values_for(&self, name: &str, dates: &[NaiveDate]) -> Result<Vec<f64>> {
        let column = self.columns.get(name).ok_or_else(|| {
            ForecastError::Schema(format!(
                "Selected regressor '{}' is not a column of the external variable table",
                name
            ))
        })?;

        dates
            .iter()
            .map(|date| {
                column
                    .get(date)
                    .copied()
                    .ok_or_else(|| ForecastError::MissingRegressor {
                        name: name.to_string(),
                        date: *date,
                    })
            })
            .collect()
    }

    /// Number of candidate columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no candidate columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
