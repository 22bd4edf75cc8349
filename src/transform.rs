//! Derived columns and reshaping of the cleaned trips.

use anyhow::{Context, Result};
use datafusion::arrow::array::{Array, AsArray};
use datafusion::arrow::datatypes::{DataType, Float64Type, Int32Type};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::functions::datetime::expr_fn::date_part;
use datafusion::functions::math::expr_fn::round;
use datafusion::functions_aggregate::expr_fn::count;
use datafusion::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::schema::{DROPOFF, DURATION_MIN, PASSENGER_COUNT, PICKUP, PICKUP_HOUR, TRIP_DISTANCE};

/// Trips strictly longer than this many miles are kept by [`long_trips`].
pub const MIN_TRIP_DISTANCE: f64 = 0.5;

/// `round((epoch(dropoff) - epoch(pickup)) / 60, 2)`
pub fn duration_minutes() -> Expr {
    let seconds = cast(col(DROPOFF), DataType::Int64) - cast(col(PICKUP), DataType::Int64);
    round(vec![
        cast(seconds, DataType::Float64) / lit(60.0),
        lit(2_i64),
    ])
}

pub fn pickup_hour() -> Expr {
    cast(date_part(lit("hour"), col(PICKUP)), DataType::Int32)
}

pub fn long_trips(df: DataFrame) -> Result<DataFrame> {
    df.filter(col(TRIP_DISTANCE).gt(lit(MIN_TRIP_DISTANCE)))
        .context("distance filter failed")
}

pub fn with_duration(df: DataFrame) -> Result<DataFrame> {
    df.with_column(DURATION_MIN, duration_minutes())
        .context("adding duration column failed")
}

pub fn with_pickup_hour(df: DataFrame) -> Result<DataFrame> {
    df.with_column(PICKUP_HOUR, pickup_hour())
        .context("adding pickup hour column failed")
}

/// (trip_distance, duration_min, passenger_count)
pub fn trip_shape(df: DataFrame) -> Result<DataFrame> {
    df.select_columns(&[TRIP_DISTANCE, DURATION_MIN, PASSENGER_COUNT])
        .context("trip shape projection failed")
}

pub fn trips_per_passenger_count(df: DataFrame) -> Result<DataFrame> {
    df.aggregate(
        vec![col(PASSENGER_COUNT)],
        vec![count(lit(1)).alias("count")],
    )?
    .sort(vec![col(PASSENGER_COUNT).sort(true, true)])
    .context("passenger count grouping failed")
}

/// Folds `(key, value)` pairs into one value per key with `combine`.
///
/// `combine` must be commutative and associative: values arrive in whatever
/// order the partitions produce them and partial results are merged again
/// with [`merge_by_key`].
pub fn reduce_by_key<K, V, I, F>(pairs: I, combine: F) -> BTreeMap<K, V>
where
    K: Ord,
    I: IntoIterator<Item = (K, V)>,
    F: Fn(V, V) -> V,
{
    let mut acc = BTreeMap::new();
    for (key, value) in pairs {
        match acc.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                let (key, prev) = slot.remove_entry();
                acc.insert(key, combine(prev, value));
            }
        }
    }
    acc
}

pub fn merge_by_key<K, V, F>(
    left: BTreeMap<K, V>,
    right: BTreeMap<K, V>,
    combine: F,
) -> BTreeMap<K, V>
where
    K: Ord,
    F: Fn(V, V) -> V,
{
    reduce_by_key(left.into_iter().chain(right), combine)
}

/// Map step: one `(pickup_hour, trip_distance)` pair per row with both set.
fn hour_distance_pairs(batch: &RecordBatch) -> Vec<(i32, f64)> {
    let hours = batch.column(0).as_primitive::<Int32Type>();
    let distances = batch.column(1).as_primitive::<Float64Type>();
    (0..batch.num_rows())
        .filter(|&i| hours.is_valid(i) && distances.is_valid(i))
        .map(|i| (hours.value(i), distances.value(i)))
        .collect()
}

/// Total distance per pickup hour, reduced per partition and then merged.
pub async fn distance_per_hour(df: &DataFrame) -> Result<BTreeMap<i32, f64>> {
    let pairs = df
        .clone()
        .select(vec![pickup_hour().alias(PICKUP_HOUR), col(TRIP_DISTANCE)])?
        .collect_partitioned()
        .await
        .context("collecting hour/distance pairs failed")?;

    let add = |a: f64, b: f64| a + b;
    let mut partials = Vec::with_capacity(pairs.len());
    for partition in &pairs {
        let mapped = partition.iter().flat_map(hour_distance_pairs);
        partials.push(reduce_by_key(mapped, add));
    }
    tracing::debug!(partitions = partials.len(), "reduced hour/distance partitions");

    Ok(partials
        .into_iter()
        .fold(BTreeMap::new(), |acc, part| merge_by_key(acc, part, add)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_sums_values_per_key() {
        let pairs = vec![(20, 1.5), (8, 2.0), (20, 0.5), (23, 4.0), (8, 1.0)];
        let totals = reduce_by_key(pairs, |a, b| a + b);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[&20], 2.0);
        assert_eq!(totals[&8], 3.0);
        assert_eq!(totals[&23], 4.0);
    }

    #[test]
    fn merging_partials_matches_single_reduction() {
        let all = vec![(1, 1.0), (2, 2.0), (1, 3.0), (3, 0.25), (2, 0.5)];
        let whole = reduce_by_key(all.clone(), |a, b| a + b);

        let left = reduce_by_key(all[..2].to_vec(), |a, b| a + b);
        let right = reduce_by_key(all[2..].to_vec(), |a, b| a + b);
        let merged = merge_by_key(left, right, |a, b| a + b);

        assert_eq!(whole, merged);
    }

    #[test]
    fn reduce_of_nothing_is_empty() {
        let totals: BTreeMap<i32, f64> = reduce_by_key(Vec::new(), |a, b| a + b);
        assert!(totals.is_empty());
    }
}
