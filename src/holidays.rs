//! Static holiday calendar loading and caching
//!
//! The calendar is deployment-configured reference data: a headerless CSV of
//! `date,holiday-name` rows. It never changes within a session, so the first
//! successful load is cached process-wide behind a `OnceLock` and shared
//! read-only afterwards.

use crate::error::{ForecastError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

static CALENDAR: OnceLock<HolidayCalendar> = OnceLock::new();

/// A single holiday: calendar date plus display name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HolidayEntry {
    /// Calendar date of the holiday
    pub date: NaiveDate,
    /// Holiday name, e.g. "Christmas Day"
    pub name: String,
}

/// Date-ordered holiday lookup table.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    by_date: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// Load the calendar from a headerless `date,name` CSV file.
    ///
    /// A missing file or an unparseable date is a `DataSource` error: the
    /// calendar is deployment configuration, so failures here are fatal to
    /// the run rather than user-correctable.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| {
                ForecastError::DataSource(format!(
                    "Cannot open holiday calendar {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let mut entries = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                ForecastError::DataSource(format!("Bad holiday calendar row {}: {}", idx + 1, e))
            })?;
            let date_field = record.get(0).unwrap_or("");
            let name_field = record.get(1).unwrap_or("").trim();
            let date = parse_date(date_field).map_err(|_| {
                ForecastError::DataSource(format!(
                    "Unparseable holiday date '{}' at row {}",
                    date_field,
                    idx + 1
                ))
            })?;
            entries.push(HolidayEntry {
                date,
                name: name_field.to_string(),
            });
        }

        Ok(Self::from_entries(entries))
    }

    /// Build a calendar from in-memory entries. Later entries win when a date
    /// appears more than once.
    pub fn from_entries(entries: Vec<HolidayEntry>) -> Self {
        let mut by_date = BTreeMap::new();
        for entry in entries {
            by_date.insert(entry.date, entry.name);
        }
        Self { by_date }
    }

    /// Process-wide cached calendar, loaded from `path` on first use.
    ///
    /// Subsequent calls return the already-loaded table regardless of path;
    /// there is no invalidation because there is no write path.
    pub fn cached<P: AsRef<Path>>(path: P) -> Result<&'static HolidayCalendar> {
        if let Some(calendar) = CALENDAR.get() {
            return Ok(calendar);
        }
        let loaded = Self::load(path)?;
        Ok(CALENDAR.get_or_init(|| loaded))
    }

    /// Holiday name on `date`, if any.
    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.by_date.get(&date).map(String::as_str)
    }

    /// Whether `date` is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> impl Iterator<Item = HolidayEntry> + '_ {
        self.by_date.iter().map(|(date, name)| HolidayEntry {
            date: *date,
            name: name.clone(),
        })
    }

    /// Number of holidays in the calendar.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    /// Whether the calendar holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
