//! Exploratory questions over the cleaned trips.

use anyhow::{Context, Result};
use datafusion::functions_aggregate::expr_fn::{avg, count, sum};
use datafusion::prelude::*;

use crate::schema::{PAYMENT_TYPE, PICKUP_HOUR, TIP_AMOUNT, TRIP_DISTANCE};
use crate::transform::with_pickup_hour;

/// Number of rows shown for the per-hour rankings.
pub const TOP_HOURS: usize = 5;

/// Which hours have the most trips?
pub fn busiest_hours(df: DataFrame) -> Result<DataFrame> {
    with_pickup_hour(df)?
        .aggregate(vec![col(PICKUP_HOUR)], vec![count(lit(1)).alias("count")])?
        .sort(vec![
            col("count").sort(false, true),
            col(PICKUP_HOUR).sort(true, true),
        ])?
        .limit(0, Some(TOP_HOURS))
        .context("busiest hours query failed")
}

/// Total distance travelled per pickup hour, longest first.
pub fn distance_by_hour(df: DataFrame) -> Result<DataFrame> {
    with_pickup_hour(df)?
        .aggregate(
            vec![col(PICKUP_HOUR)],
            vec![sum(col(TRIP_DISTANCE)).alias("total_distance")],
        )?
        .sort(vec![
            col("total_distance").sort(false, true),
            col(PICKUP_HOUR).sort(true, true),
        ])?
        .limit(0, Some(TOP_HOURS))
        .context("distance by hour query failed")
}

/// Average tip for every payment type.
pub fn tip_by_payment_type(df: DataFrame) -> Result<DataFrame> {
    df.aggregate(
        vec![col(PAYMENT_TYPE)],
        vec![avg(col(TIP_AMOUNT)).alias("avg_tip")],
    )?
    .sort(vec![col(PAYMENT_TYPE).sort(true, true)])
    .context("tip by payment type query failed")
}
