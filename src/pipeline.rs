//! End-to-end orchestration of the forecast pipeline
//!
//! One synchronous, single-threaded run per user interaction: normalize →
//! merge regressors → filter/aggregate → configure → fit/predict → format.
//! Validation happens as early as each stage allows, so a partially-invalid
//! state never reaches the model; the first error aborts the run and there
//! are no retries.

use crate::config::ForecastConfig;
use crate::data::SalesTable;
use crate::error::Result;
use crate::format::{ForecastTable, OverlaySeries};
use crate::holidays::HolidayCalendar;
use crate::model::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::regressors::ExternalVariables;
use crate::selection::{filter_and_aggregate, Selection};

/// Everything the presentation layer renders after a run.
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    /// The year being forecast
    pub next_year: i32,
    /// Raw model output over the Q1 window
    pub result: ForecastResult,
    /// Historical vs forecast series for the chart
    pub overlay: OverlaySeries,
    /// Display/export table
    pub table: ForecastTable,
}

/// The forecast pipeline, bound to a holiday calendar for its lifetime.
#[derive(Debug, Clone, Copy)]
pub struct ForecastPipeline<'a> {
    holidays: &'a HolidayCalendar,
}

impl<'a> ForecastPipeline<'a> {
    /// Create a pipeline over the given holiday calendar.
    pub fn new(holidays: &'a HolidayCalendar) -> Self {
        Self { holidays }
    }

    /// Run one forecast for the given upload, selection and configuration.
    pub fn run<M: ForecastModel>(
        &self,
        sales: SalesTable,
        external: Option<&ExternalVariables>,
        stores: &Selection,
        items: &Selection,
        config: ForecastConfig,
        model: &M,
    ) -> Result<ForecastOutcome> {
        let normalized = sales.normalize(self.holidays)?;
        let known_stores = normalized.stores();
        let known_items = normalized.items();

        let series = filter_and_aggregate(&normalized, stores, items)?;

        let request = config.build_request(&normalized, &series, external)?;

        let trained = model.fit(&request.config, &request.training)?;
        let result = trained.predict(&request.future)?;

        let overlay = OverlaySeries::new(&series, &result);
        let table = ForecastTable::build(&result, stores, items, &known_stores, &known_items);

        Ok(ForecastOutcome {
            next_year: normalized.next_year(),
            result,
            overlay,
            table,
        })
    }
}
