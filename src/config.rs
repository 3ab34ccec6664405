//! Forecast configuration and request assembly
//!
//! Turns user-chosen parameters into a validated model configuration, and
//! assembles the training and future frames the model fits and predicts on.
//! All regressor coverage is checked here, before fit/predict ever runs.

use crate::data::NormalizedSales;
use crate::error::{ForecastError, Result};
use crate::regressors::ExternalVariables;
use crate::selection::AggregatedSeries;
use crate::utils::q1_date_range;
use chrono::NaiveDate;
use polars::prelude::*;

/// Slider range for the changepoint sensitivity.
pub const CHANGEPOINT_SENSITIVITY_MIN: f64 = 0.01;
/// Upper bound of the changepoint sensitivity range.
pub const CHANGEPOINT_SENSITIVITY_MAX: f64 = 0.5;
/// Default changepoint sensitivity (mid-range conservative).
pub const CHANGEPOINT_SENSITIVITY_DEFAULT: f64 = 0.05;

/// Lower bound of the monthly Fourier order range.
pub const MONTHLY_FOURIER_ORDER_MIN: u32 = 2;
/// Upper bound of the monthly Fourier order range.
pub const MONTHLY_FOURIER_ORDER_MAX: u32 = 10;
/// Default monthly Fourier order.
pub const MONTHLY_FOURIER_ORDER_DEFAULT: u32 = 5;

/// Period of the explicit monthly seasonal term, in days.
pub const MONTHLY_SEASONALITY_PERIOD_DAYS: f64 = 30.5;

/// Country whose public holidays the model should learn effects for.
pub const HOLIDAY_COUNTRY: &str = "US";

/// A seasonal component the model should fit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Seasonality {
    /// Component name, e.g. "weekly"
    pub name: String,
    /// Period in days
    pub period_days: f64,
    /// Number of Fourier terms representing the component
    pub fourier_order: u32,
}

/// Validated model configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ForecastConfig {
    changepoint_sensitivity: f64,
    monthly_fourier_order: u32,
    regressors: Vec<String>,
}

impl ForecastConfig {
    /// Create a configuration, validating both tunables against their
    /// slider ranges.
    pub fn new(changepoint_sensitivity: f64, monthly_fourier_order: u32) -> Result<Self> {
        if !(CHANGEPOINT_SENSITIVITY_MIN..=CHANGEPOINT_SENSITIVITY_MAX)
            .contains(&changepoint_sensitivity)
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Changepoint sensitivity must be between {} and {}",
                CHANGEPOINT_SENSITIVITY_MIN, CHANGEPOINT_SENSITIVITY_MAX
            )));
        }
        if !(MONTHLY_FOURIER_ORDER_MIN..=MONTHLY_FOURIER_ORDER_MAX)
            .contains(&monthly_fourier_order)
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Monthly Fourier order must be between {} and {}",
                MONTHLY_FOURIER_ORDER_MIN, MONTHLY_FOURIER_ORDER_MAX
            )));
        }

        Ok(Self {
            changepoint_sensitivity,
            monthly_fourier_order,
            regressors: Vec::new(),
        })
    }

    /// Register the selected external regressor columns as model inputs.
    pub fn with_regressors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regressors = names.into_iter().map(Into::into).collect();
        self
    }

    /// How readily the trend adapts to shifts in recent history.
    pub fn changepoint_sensitivity(&self) -> f64 {
        self.changepoint_sensitivity
    }

    /// Flexibility of the explicit monthly seasonal term.
    pub fn monthly_fourier_order(&self) -> u32 {
        self.monthly_fourier_order
    }

    /// Names of the registered regressor columns.
    pub fn regressors(&self) -> &[String] {
        &self.regressors
    }

    /// The seasonal components the model must fit: daily, weekly and yearly
    /// terms are always on, plus the explicit monthly term.
    pub fn seasonalities(&self) -> Vec<Seasonality> {
        vec![
            Seasonality {
                name: "daily".to_string(),
                period_days: 1.0,
                fourier_order: 4,
            },
            Seasonality {
                name: "weekly".to_string(),
                period_days: 7.0,
                fourier_order: 3,
            },
            Seasonality {
                name: "yearly".to_string(),
                period_days: 365.25,
                fourier_order: 10,
            },
            Seasonality {
                name: "monthly".to_string(),
                period_days: MONTHLY_SEASONALITY_PERIOD_DAYS,
                fourier_order: self.monthly_fourier_order,
            },
        ]
    }

    /// Assemble the complete forecast request.
    ///
    /// The training frame carries the aggregated target with per-date
    /// encoded features and the selected regressor columns; the future frame
    /// carries the Q1 window of `next_year` with the same regressor columns.
    /// Selecting regressors without an external table, or selecting a name
    /// the table does not carry, is a `Schema` error; a table that does not
    /// cover every needed date is a `MissingRegressor` error.
    pub fn build_request(
        self,
        data: &NormalizedSales,
        series: &AggregatedSeries,
        external: Option<&ExternalVariables>,
    ) -> Result<ForecastRequest> {
        let dates = series.dates();
        let target = series.values();

        let feature_names = data.features().names();
        let mut features: Vec<(String, Vec<f64>)> = feature_names
            .iter()
            .map(|name| (name.clone(), Vec::with_capacity(dates.len())))
            .collect();
        for date in &dates {
            let row = data.features().row(*date).ok_or_else(|| {
                ForecastError::Schema(format!("No encoded features for date {}", date))
            })?;
            for (slot, value) in features.iter_mut().zip(row) {
                slot.1.push(f64::from(*value));
            }
        }

        let future_dates = q1_date_range(data.next_year());

        let mut historical_regressors = Vec::with_capacity(self.regressors.len());
        let mut future_regressors = Vec::with_capacity(self.regressors.len());
        if !self.regressors.is_empty() {
            let external = external.ok_or_else(|| {
                ForecastError::Schema(
                    "Regressors selected but no external variable table was provided"
                        .to_string(),
                )
            })?;
            for name in &self.regressors {
                historical_regressors
                    .push((name.clone(), external.values_for(name, &dates)?));
                future_regressors
                    .push((name.clone(), external.values_for(name, &future_dates)?));
            }
        }

        let training = TrainingFrame {
            dates,
            target,
            features,
            regressors: historical_regressors,
        };
        let future = FutureFrame {
            dates: future_dates,
            regressors: future_regressors,
        };

        Ok(ForecastRequest {
            config: self,
            training,
            future,
        })
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            changepoint_sensitivity: CHANGEPOINT_SENSITIVITY_DEFAULT,
            monthly_fourier_order: MONTHLY_FOURIER_ORDER_DEFAULT,
            regressors: Vec::new(),
        }
    }
}

/// The historical frame the model fits on.
#[derive(Debug, Clone)]
pub struct TrainingFrame {
    dates: Vec<NaiveDate>,
    target: Vec<f64>,
    features: Vec<(String, Vec<f64>)>,
    regressors: Vec<(String, Vec<f64>)>,
}

impl TrainingFrame {
    /// Training dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Aggregated sales target, date-aligned.
    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Encoded feature columns (holiday flag and indicators), date-aligned.
    pub fn features(&self) -> &[(String, Vec<f64>)] {
        &self.features
    }

    /// Registered regressor columns, date-aligned.
    pub fn regressors(&self) -> &[(String, Vec<f64>)] {
        &self.regressors
    }

    /// A regressor column by name.
    pub fn regressor(&self, name: &str) -> Option<&[f64]> {
        self.regressors
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Number of training rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Materialize the frame as a polars DataFrame (inspection, export).
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![
            DateChunked::from_naive_date("date", self.dates.iter().copied()).into_series(),
            Series::new("y", self.target.clone()),
        ];
        for (name, values) in self.features.iter().chain(self.regressors.iter()) {
            columns.push(Series::new(name, values.clone()));
        }
        Ok(DataFrame::new(columns)?)
    }
}

/// The future frame the model predicts over: the Q1 window of `next_year`.
#[derive(Debug, Clone)]
pub struct FutureFrame {
    dates: Vec<NaiveDate>,
    regressors: Vec<(String, Vec<f64>)>,
}

impl FutureFrame {
    /// Future dates, ascending and duplicate-free.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Registered regressor columns, date-aligned.
    pub fn regressors(&self) -> &[(String, Vec<f64>)] {
        &self.regressors
    }

    /// A regressor column by name.
    pub fn regressor(&self, name: &str) -> Option<&[f64]> {
        self.regressors
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Number of future rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the window is empty (it never is for a valid request).
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Everything the external model needs: configuration plus both frames.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Validated model configuration
    pub config: ForecastConfig,
    /// Historical frame to fit on
    pub training: TrainingFrame,
    /// Future frame to predict over
    pub future: FutureFrame,
}
