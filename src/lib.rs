//! # NextQ Forecast
//!
//! Data-preparation and forecast-configuration pipeline for a sales
//! forecasting dashboard: uploaded per-store/per-item daily sales (plus an
//! optional external-regressor table) become a clean regression frame and a
//! validated model configuration for a Q1-next-year forecast.
//!
//! ## Features
//!
//! - Schema-validated CSV ingestion of sales and external-variable uploads
//! - Latest-year training-history restriction with holiday-flag merging
//! - Drop-first one-hot encoding of month/holiday/weekday features
//! - Store/item filtering with per-date aggregation
//! - Bounded model configuration (changepoint sensitivity, monthly Fourier
//!   order, US country holidays, registered regressors) and Q1 future frame
//! - Display-table and chart-overlay shaping of model output
//!
//! The statistical model itself is an external collaborator behind the
//! [`ForecastModel`] trait; [`model::SeasonalBaseline`] is a minimal
//! reference implementation for demos and tests.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nextq_forecast::{
//!     ForecastConfig, ForecastPipeline, HolidayCalendar, SalesTable, Selection,
//! };
//! use nextq_forecast::model::SeasonalBaseline;
//!
//! # fn main() -> nextq_forecast::Result<()> {
//! let holidays = HolidayCalendar::cached("data/us_bank_holidays.csv")?;
//! let sales = SalesTable::from_csv("sales.csv")?;
//!
//! let pipeline = ForecastPipeline::new(holidays);
//! let outcome = pipeline.run(
//!     sales,
//!     None,
//!     &Selection::All,
//!     &Selection::All,
//!     ForecastConfig::default(),
//!     &SeasonalBaseline::new(),
//! )?;
//!
//! println!("Forecast for Q1 {}", outcome.next_year);
//! println!("{:?}", outcome.table.to_dataframe()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod holidays;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod regressors;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, ForecastRequest, FutureFrame, TrainingFrame};
pub use crate::data::{NormalizedSales, SalesRecord, SalesTable};
pub use crate::error::{ForecastError, Result};
pub use crate::format::{ForecastTable, OverlaySeries};
pub use crate::holidays::{HolidayCalendar, HolidayEntry};
pub use crate::model::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::{ForecastOutcome, ForecastPipeline};
pub use crate::regressors::ExternalVariables;
pub use crate::selection::{filter_and_aggregate, AggregatedSeries, Selection};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
