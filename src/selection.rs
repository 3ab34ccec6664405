//! Store/item selection and daily aggregation

use crate::data::NormalizedSales;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// A per-dimension selection: everything, or an explicit subset.
///
/// An empty `Subset` is a legal state meaning "nothing selected" and is
/// distinct from `All`; it fails filtering with `EmptySelection` instead of
/// being silently widened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every known identifier
    All,
    /// An explicit set of identifiers, possibly empty
    Subset(BTreeSet<String>),
}

impl Selection {
    /// Build an explicit subset from anything yielding identifiers.
    pub fn subset<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Subset(values.into_iter().map(Into::into).collect())
    }

    /// Whether `value` passes this selection.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Subset(values) => values.contains(value),
        }
    }

    /// Whether this selection names strictly fewer identifiers than `known`.
    ///
    /// Drives result annotation: a subset that happens to list every known
    /// identifier behaves like `All` and gets no label.
    pub fn is_strict_subset_of(&self, known: &BTreeSet<String>) -> bool {
        match self {
            Selection::All => false,
            Selection::Subset(values) => values != known,
        }
    }

    /// Comma-joined identifier label for display, `None` for `All`.
    pub fn label(&self) -> Option<String> {
        match self {
            Selection::All => None,
            Selection::Subset(values) => {
                Some(values.iter().cloned().collect::<Vec<_>>().join(", "))
            }
        }
    }
}

/// The aggregated training target: one summed sales value per date, ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl AggregatedSeries {
    /// Ordered (date, total sales) points.
    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// The dates of the series, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|(d, _)| *d).collect()
    }

    /// The summed sales values, date-aligned.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Filter rows by store/item selection and sum sales per calendar date.
///
/// Duplicate (date, store, item) rows sum like any others, and input order
/// never affects the result. Dates with no surviving rows are absent from
/// the output rather than zero-filled. Zero surviving rows is the
/// user-correctable `EmptySelection` condition.
pub fn filter_and_aggregate(
    data: &NormalizedSales,
    stores: &Selection,
    items: &Selection,
) -> Result<AggregatedSeries> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut matched = 0usize;

    for record in data.records() {
        if stores.matches(&record.store) && items.matches(&record.item) {
            *totals.entry(record.date).or_insert(0.0) += record.sales;
            matched += 1;
        }
    }

    if matched == 0 {
        return Err(ForecastError::EmptySelection);
    }

    Ok(AggregatedSeries {
        points: totals.into_iter().collect(),
    })
}
