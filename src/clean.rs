//! Row filtering and duplicate removal.

use anyhow::{Context, Result};
use datafusion::prelude::*;

use crate::schema::{
    trip_column_names, DEDUP_KEY, FARE_AMOUNT, PASSENGER_COUNT, TIP_AMOUNT, TOTAL_AMOUNT,
    TRIP_DISTANCE,
};

/// Conjunction of the five validity rules. Rows with a null in any of the
/// checked columns do not satisfy it.
pub fn validity_predicate() -> Expr {
    col(PASSENGER_COUNT)
        .gt(lit(0_i64))
        .and(col(TRIP_DISTANCE).gt(lit(0.0)))
        .and(col(FARE_AMOUNT).gt_eq(lit(0.0)))
        .and(col(TOTAL_AMOUNT).gt(lit(0.0)))
        .and(col(TIP_AMOUNT).gt_eq(lit(0.0)))
}

pub fn filter_valid(df: DataFrame) -> Result<DataFrame> {
    df.filter(validity_predicate())
        .context("validity filter failed")
}

pub fn drop_exact_duplicates(df: DataFrame) -> Result<DataFrame> {
    df.distinct().context("exact deduplication failed")
}

/// Keeps one row per dedup key. Which row survives is not defined.
pub fn drop_key_duplicates(df: DataFrame) -> Result<DataFrame> {
    let on = DEDUP_KEY.iter().map(|c| col(*c)).collect::<Vec<_>>();
    let select = trip_column_names()
        .into_iter()
        .map(col)
        .collect::<Vec<_>>();
    df.distinct_on(on, select, None)
        .context("key deduplication failed")
}

/// Runs the deduplication once and keeps the rows in memory.
///
/// Every later action reads the same rows, so the key representatives picked
/// by [`drop_key_duplicates`] stay the same for the rest of the run.
pub async fn materialize(df: DataFrame) -> Result<DataFrame> {
    df.cache().await.context("caching cleaned trips failed")
}

/// Validity filter, then exact dedup, then key dedup, materialized.
pub async fn clean(df: DataFrame) -> Result<DataFrame> {
    let valid = filter_valid(df)?;
    let unique = drop_exact_duplicates(valid)?;
    materialize(drop_key_duplicates(unique)?).await
}
