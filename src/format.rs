//! Display-ready shaping of forecast output

use crate::error::Result;
use crate::model::ForecastResult;
use crate::selection::{AggregatedSeries, Selection};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::io::Write;

/// Historical and forecast series side by side, for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySeries {
    /// (date, actual sales) points from the aggregated history
    pub actual: Vec<(NaiveDate, f64)>,
    /// (date, predicted sales) points from the model
    pub forecast: Vec<(NaiveDate, f64)>,
}

impl OverlaySeries {
    /// Pair the aggregated history with the forecast.
    pub fn new(series: &AggregatedSeries, result: &ForecastResult) -> Self {
        Self {
            actual: series.points().to_vec(),
            forecast: result.points().collect(),
        }
    }
}

/// The tabular forecast export: optional selection labels, then one row per
/// forecast date in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    store_label: Option<String>,
    item_label: Option<String>,
    rows: Vec<(NaiveDate, f64)>,
}

impl ForecastTable {
    /// Build the display table from the model output.
    ///
    /// When the active selection is a strict subset of the known stores or
    /// items, the comma-joined selection labels are carried as leading
    /// `Store`/`Item` columns so exported rows stay self-describing.
    pub fn build(
        result: &ForecastResult,
        stores: &Selection,
        items: &Selection,
        known_stores: &BTreeSet<String>,
        known_items: &BTreeSet<String>,
    ) -> Self {
        let annotate = stores.is_strict_subset_of(known_stores)
            || items.is_strict_subset_of(known_items);
        let (store_label, item_label) = if annotate {
            (
                Some(stores.label().unwrap_or_else(|| join(known_stores))),
                Some(items.label().unwrap_or_else(|| join(known_items))),
            )
        } else {
            (None, None)
        };

        Self {
            store_label,
            item_label,
            rows: result.points().collect(),
        }
    }

    /// Selection label for the `Store` column, when annotated.
    pub fn store_label(&self) -> Option<&str> {
        self.store_label.as_deref()
    }

    /// Selection label for the `Item` column, when annotated.
    pub fn item_label(&self) -> Option<&str> {
        self.item_label.as_deref()
    }

    /// (date, forecasted sales) rows, ascending by date.
    pub fn rows(&self) -> &[(NaiveDate, f64)] {
        &self.rows
    }

    /// Column names in display order.
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(4);
        if self.store_label.is_some() {
            names.push("Store");
            names.push("Item");
        }
        names.push("Date");
        names.push("Forecasted Sales");
        names
    }

    /// Number of forecast rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialize as a polars DataFrame for the presentation layer.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let n = self.rows.len();
        let mut columns = Vec::with_capacity(4);
        if let (Some(store), Some(item)) = (&self.store_label, &self.item_label) {
            columns.push(Series::new("Store", vec![store.clone(); n]));
            columns.push(Series::new("Item", vec![item.clone(); n]));
        }
        let dates: Vec<String> = self
            .rows
            .iter()
            .map(|(date, _)| date.format("%Y-%m-%d").to_string())
            .collect();
        let values: Vec<f64> = self.rows.iter().map(|(_, value)| *value).collect();
        columns.push(Series::new("Date", dates));
        columns.push(Series::new("Forecasted Sales", values));

        Ok(DataFrame::new(columns)?)
    }

    /// Write the table as CSV, header included.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.column_names()).map_err(io_error)?;
        for (date, value) in &self.rows {
            let date_field = date.format("%Y-%m-%d").to_string();
            let value_field = value.to_string();
            let mut record: Vec<&str> = Vec::with_capacity(4);
            if let (Some(store), Some(item)) = (&self.store_label, &self.item_label) {
                record.push(store);
                record.push(item);
            }
            record.push(&date_field);
            record.push(&value_field);
            csv_writer.write_record(&record).map_err(io_error)?;
        }
        csv_writer
            .flush()
            .map_err(crate::error::ForecastError::Io)?;
        Ok(())
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn io_error(err: csv::Error) -> crate::error::ForecastError {
    crate::error::ForecastError::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
}
