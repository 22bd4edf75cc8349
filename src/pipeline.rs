//! The whole run, stage by stage.

use anyhow::{Context, Result};
use datafusion::arrow::array::AsArray;
use datafusion::arrow::datatypes::Int64Type;
use datafusion::arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;

use crate::config::{validate_input, PipelineConfig};
use crate::profile::QualityReport;
use crate::report::{
    print_banner, print_batches, print_counts, print_df, print_pairs, print_sample, print_schema,
};
use crate::session::TaxiSession;
use crate::summary::ColumnSummary;
use crate::{analyze, clean, load, persist, profile, summary, transform};

pub const SESSION_NAME: &str = "nyc_taxi_clean";

/// Row counts and results gathered along the way.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub raw_rows: usize,
    pub selected_rows: usize,
    pub valid_rows: usize,
    pub cleaned_rows: usize,
    pub long_trip_rows: usize,
    pub passenger_group_total: usize,
    pub quality: QualityReport,
    pub distance_per_hour: BTreeMap<i32, f64>,
    pub summaries: Vec<ColumnSummary>,
}

pub async fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    validate_input(&config.input)?;

    let session = TaxiSession::open(SESSION_NAME, config.target_partitions);
    let outcome = run_stages(&session, config).await;
    session.close();
    outcome
}

async fn run_stages(session: &TaxiSession, config: &PipelineConfig) -> Result<PipelineOutcome> {
    let mut outcome = PipelineOutcome::default();

    print_banner("1. Loading raw trips");
    let raw = load::load(session.ctx(), &config.input).await?;
    outcome.raw_rows = raw.frame.clone().count().await?;
    tracing::info!(rows = outcome.raw_rows, "loaded {}", config.input.display());
    println!("Raw rows : {}", outcome.raw_rows);
    print_sample("Raw sample", &raw.frame).await?;
    print_schema("Raw schema (inferred)", &raw.inferred);

    print_banner("2. Selecting trip columns");
    let selected = load::project(raw.frame)?;
    outcome.selected_rows = selected.clone().count().await?;
    print_sample("Selected sample", &selected).await?;
    print_schema("Selected schema", selected.schema().as_arrow());

    print_banner("3. Data quality");
    outcome.quality = profile::profile(&selected).await?;
    print_counts(
        "Null values per column",
        outcome
            .quality
            .null_counts
            .iter()
            .map(|(name, n)| (name.as_str(), *n)),
    );
    print_counts(
        "Out-of-range values",
        outcome.quality.violation_counts.iter().copied(),
    );

    print_banner("4. Cleaning");
    let valid = clean::filter_valid(selected)?;
    outcome.valid_rows = valid.clone().count().await?;
    println!("Rows after validity filter : {}", outcome.valid_rows);
    let unique = clean::drop_key_duplicates(clean::drop_exact_duplicates(valid)?)?;
    let cleaned = clean::materialize(unique).await?;
    outcome.cleaned_rows = cleaned.clone().count().await?;
    println!("Rows after duplicate removal : {}", outcome.cleaned_rows);
    tracing::info!(
        selected = outcome.selected_rows,
        valid = outcome.valid_rows,
        cleaned = outcome.cleaned_rows,
        "cleaning done"
    );
    print_sample("Cleaned sample", &cleaned).await?;

    print_banner("5. Transformations");
    let long = transform::long_trips(cleaned.clone())?;
    outcome.long_trip_rows = long.clone().count().await?;
    println!(
        "Trips > {} mile : {}",
        transform::MIN_TRIP_DISTANCE,
        outcome.long_trip_rows
    );
    let timed = transform::with_duration(long)?;
    print_sample("With duration", &timed).await?;
    let shaped = transform::trip_shape(timed)?;
    print_sample("Distance / duration / passengers", &shaped).await?;
    let groups = transform::trips_per_passenger_count(shaped)?.collect().await?;
    outcome.passenger_group_total = groups
        .iter()
        .map(group_count_total)
        .sum::<Result<usize>>()?;
    print_batches("Trips per passenger count", &groups)?;
    outcome.distance_per_hour = transform::distance_per_hour(&cleaned).await?;
    print_pairs(
        "Distance per pickup hour (map/reduce)",
        &outcome.distance_per_hour,
        10,
    );

    print_banner("6. Analyses");
    let busiest = analyze::busiest_hours(cleaned.clone())?;
    print_df("Busiest pickup hours", busiest).await?;
    let distance = analyze::distance_by_hour(cleaned.clone())?;
    print_df("Total distance per hour", distance).await?;
    let tips = analyze::tip_by_payment_type(cleaned.clone())?;
    print_df("Average tip per payment type", tips).await?;

    print_banner("7. Descriptive statistics");
    outcome.summaries = summary::describe(&cleaned).await?;
    print_batches("Summary", &[summary::summary_batch(&outcome.summaries)?])?;

    print_banner("8. Saving cleaned trips");
    persist::write_single_csv(cleaned, &config.output).await?;
    println!("Cleaned dataset saved to : {}", config.output.display());
    tracing::info!(rows = outcome.cleaned_rows, "wrote {}", config.output.display());

    Ok(outcome)
}

fn group_count_total(batch: &RecordBatch) -> Result<usize> {
    let counts = batch
        .column_by_name("count")
        .context("group result has no count column")?
        .as_primitive::<Int64Type>();
    Ok(counts.iter().flatten().map(|n| n as usize).sum())
}
