//! The seam to the external forecasting model
//!
//! The statistical model (trend/seasonality decomposition, changepoints,
//! optimization) lives outside this crate. The pipeline talks to it through
//! the two-trait fit/predict seam below; `SeasonalBaseline` is a deliberately
//! simple reference implementation so demos and integration tests can run
//! the pipeline end to end without the external library.

use crate::config::{ForecastConfig, FutureFrame, TrainingFrame};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt::Debug;

/// Ordered forecast output: one predicted value per requested date.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ForecastResult {
    /// Create a forecast result, enforcing date/value alignment.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast dates ({}) don't match values ({})",
                dates.len(),
                values.len()
            )));
        }

        Ok(Self { dates, values })
    }

    /// Predicted dates, in the order requested.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Predicted values, date-aligned.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (date, value) pairs.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of predictions.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the result holds no predictions.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// A model fitted to a training frame, ready to predict.
pub trait TrainedForecastModel: Debug {
    /// Predict one value per date of the future frame.
    ///
    /// The frame must carry every regressor registered at fit time;
    /// implementations surface a gap as `MissingRegressor` rather than
    /// predicting from silently absent inputs.
    fn predict(&self, future: &FutureFrame) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A forecast model that can be fitted to a training frame.
///
/// Fit and predict are synchronous, blocking calls with no timeout; a run
/// that fails anywhere is terminal, never retried.
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Trained: TrainedForecastModel;

    /// Fit the model on the training frame under the given configuration.
    fn fit(&self, config: &ForecastConfig, training: &TrainingFrame) -> Result<Self::Trained>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Weekday-profile baseline: predicts the historical mean of each weekday.
///
/// Ignores the changepoint and Fourier settings; honors the regressor
/// contract (registered columns must exist in the future frame) without
/// actually weighting them. Good enough to exercise the pipeline, nothing
/// more.
#[derive(Debug, Clone, Default)]
pub struct SeasonalBaseline;

impl SeasonalBaseline {
    /// Create a baseline model.
    pub fn new() -> Self {
        Self
    }
}

/// Fitted weekday-profile baseline.
#[derive(Debug, Clone)]
pub struct TrainedSeasonalBaseline {
    weekday_means: [f64; 7],
    regressors: Vec<String>,
}

impl ForecastModel for SeasonalBaseline {
    type Trained = TrainedSeasonalBaseline;

    fn fit(&self, config: &ForecastConfig, training: &TrainingFrame) -> Result<Self::Trained> {
        if training.is_empty() {
            return Err(ForecastError::Schema(
                "Cannot fit on an empty training frame".to_string(),
            ));
        }
        for name in config.regressors() {
            if training.regressor(name).is_none() {
                return Err(ForecastError::MissingRegressor {
                    name: name.clone(),
                    date: training.dates()[0],
                });
            }
        }

        let mut sums = [0.0f64; 7];
        let mut counts = [0usize; 7];
        for (date, value) in training.dates().iter().zip(training.target()) {
            let idx = date.weekday().num_days_from_monday() as usize;
            sums[idx] += value;
            counts[idx] += 1;
        }

        let overall = training.target().iter().sum::<f64>() / training.len() as f64;
        let mut weekday_means = [overall; 7];
        for idx in 0..7 {
            if counts[idx] > 0 {
                weekday_means[idx] = sums[idx] / counts[idx] as f64;
            }
        }

        Ok(TrainedSeasonalBaseline {
            weekday_means,
            regressors: config.regressors().to_vec(),
        })
    }

    fn name(&self) -> &str {
        "Seasonal baseline (weekday profile)"
    }
}

impl TrainedForecastModel for TrainedSeasonalBaseline {
    fn predict(&self, future: &FutureFrame) -> Result<ForecastResult> {
        for name in &self.regressors {
            if future.regressor(name).is_none() {
                let date = future
                    .dates()
                    .first()
                    .copied()
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch"));
                return Err(ForecastError::MissingRegressor {
                    name: name.clone(),
                    date,
                });
            }
        }

        let values = future
            .dates()
            .iter()
            .map(|date| self.weekday_means[date.weekday().num_days_from_monday() as usize])
            .collect();

        ForecastResult::new(future.dates().to_vec(), values)
    }

    fn name(&self) -> &str {
        "Seasonal baseline (weekday profile)"
    }
}
