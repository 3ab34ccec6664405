//! End-to-end pipeline walkthrough on generated sample data.
//!
//! Run with: cargo run --example quickstart

use nextq_forecast::model::SeasonalBaseline;
use nextq_forecast::utils::generate_sales_history;
use nextq_forecast::{
    ForecastConfig, ForecastPipeline, HolidayCalendar, Result, SalesTable, Selection,
};

fn main() -> Result<()> {
    let holidays = HolidayCalendar::cached("data/us_bank_holidays.csv")?;

    // A year of synthetic history for two stores and two items.
    let records = generate_sales_history(&["1", "2"], &["101", "102"], 2019, 50.0, 5.0);
    let sales = SalesTable::from_records(records);

    let config = ForecastConfig::new(0.05, 5)?;
    let pipeline = ForecastPipeline::new(holidays);

    // Forecast all stores/items first.
    let outcome = pipeline.run(
        sales.clone(),
        None,
        &Selection::All,
        &Selection::All,
        config.clone(),
        &SeasonalBaseline::new(),
    )?;

    println!("Forecast for Q1 {}", outcome.next_year);
    println!(
        "{} historical days, {} forecast days",
        outcome.overlay.actual.len(),
        outcome.overlay.forecast.len()
    );
    println!("{}", outcome.table.to_dataframe()?.head(Some(5)));

    // Then a single-store drill-down; the table picks up selection labels.
    let drill = pipeline.run(
        sales,
        None,
        &Selection::subset(["1"]),
        &Selection::All,
        config,
        &SeasonalBaseline::new(),
    )?;
    println!(
        "Store {:?} forecast rows: {}",
        drill.table.store_label(),
        drill.table.len()
    );

    let mut csv_out = Vec::new();
    drill.table.write_csv(&mut csv_out)?;
    println!(
        "CSV export preview:\n{}",
        String::from_utf8_lossy(&csv_out)
            .lines()
            .take(3)
            .collect::<Vec<_>>()
            .join("\n")
    );

    Ok(())
}
