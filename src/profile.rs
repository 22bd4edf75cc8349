//! Data quality profile: null counts and out-of-range counts.
//!
//! Purely observational, the profiled frame is not changed.

use anyhow::{Context, Result};
use datafusion::arrow::array::{Array, AsArray};
use datafusion::arrow::datatypes::Int64Type;
use datafusion::functions_aggregate::expr_fn::count;
use datafusion::prelude::*;

use crate::schema::{FARE_AMOUNT, PASSENGER_COUNT, TIP_AMOUNT, TOTAL_AMOUNT, TRIP_DISTANCE};

/// A named predicate describing rows that break a validity rule.
pub struct Violation {
    pub label: &'static str,
    pub predicate: Expr,
}

/// The five out-of-range checks, each the negation of a cleaning rule.
pub fn violations() -> Vec<Violation> {
    vec![
        Violation {
            label: "Passagers ≤ 0",
            predicate: col(PASSENGER_COUNT).lt_eq(lit(0_i64)),
        },
        Violation {
            label: "Distance ≤ 0",
            predicate: col(TRIP_DISTANCE).lt_eq(lit(0.0)),
        },
        Violation {
            label: "fare_amount < 0",
            predicate: col(FARE_AMOUNT).lt(lit(0.0)),
        },
        Violation {
            label: "total_amount ≤ 0",
            predicate: col(TOTAL_AMOUNT).lt_eq(lit(0.0)),
        },
        Violation {
            label: "tip_amount < 0",
            predicate: col(TIP_AMOUNT).lt(lit(0.0)),
        },
    ]
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityReport {
    /// Missing values per column, in column order.
    pub null_counts: Vec<(String, usize)>,
    /// Rows matching each violation, in [`violations`] order.
    pub violation_counts: Vec<(&'static str, usize)>,
}

impl QualityReport {
    pub fn nulls(&self, column: &str) -> Option<usize> {
        self.null_counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, n)| *n)
    }

    pub fn violation(&self, label: &str) -> Option<usize> {
        self.violation_counts
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, n)| *n)
    }
}

/// One-row frame with the number of nulls in every column.
fn null_counts_frame(df: &DataFrame) -> Result<DataFrame> {
    let columns: Vec<String> = df
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let mut aggs = Vec::with_capacity(columns.len());
    for name in &columns {
        let is_missing = when(col(name.as_str()).is_null(), lit(1_i64)).end()?;
        aggs.push(count(is_missing).alias(name.as_str()));
    }

    df.clone()
        .aggregate(vec![], aggs)
        .context("null count aggregation failed")
}

pub async fn profile(df: &DataFrame) -> Result<QualityReport> {
    let batches = null_counts_frame(df)?.collect().await?;

    let mut null_counts = Vec::new();
    if let Some(batch) = batches.iter().find(|b| b.num_rows() > 0) {
        for (field, column) in batch.schema().fields().iter().zip(batch.columns()) {
            let counts = column.as_primitive::<Int64Type>();
            let n = if counts.is_null(0) { 0 } else { counts.value(0) };
            null_counts.push((field.name().clone(), n as usize));
        }
    }

    let mut violation_counts = Vec::new();
    for violation in violations() {
        let n = df
            .clone()
            .filter(violation.predicate)?
            .count()
            .await
            .with_context(|| format!("counting '{}' failed", violation.label))?;
        violation_counts.push((violation.label, n));
    }

    Ok(QualityReport {
        null_counts,
        violation_counts,
    })
}
