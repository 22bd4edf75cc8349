//! Descriptive statistics for the numeric columns.

use anyhow::{Context, Result};
use datafusion::arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use datafusion::arrow::datatypes::{DataType, Field, Float64Type, Int64Type, Schema};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::functions_aggregate::expr_fn::{avg, count, max, min, stddev};
use datafusion::prelude::*;
use std::sync::Arc;

use crate::schema::is_numeric;

pub const STATISTICS: [&str; 5] = ["count", "mean", "stddev", "min", "max"];

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-null values.
    pub count: i64,
    pub mean: Option<f64>,
    /// Sample standard deviation, unset below two values.
    pub stddev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    fn statistic(&self, name: &str) -> Option<f64> {
        match name {
            "count" => Some(self.count as f64),
            "mean" => self.mean,
            "stddev" => self.stddev,
            "min" => self.min,
            "max" => self.max,
            _ => None,
        }
    }
}

fn alias(column: &str, statistic: &str) -> String {
    format!("{column}__{statistic}")
}

fn float_at(batch: &RecordBatch, name: &str) -> Result<Option<f64>> {
    let array = batch
        .column_by_name(name)
        .with_context(|| format!("missing statistic column {name}"))?
        .as_primitive::<Float64Type>();
    Ok(array.is_valid(0).then(|| array.value(0)))
}

pub async fn describe(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    let columns: Vec<String> = df
        .schema()
        .fields()
        .iter()
        .filter(|f| is_numeric(f.data_type()))
        .map(|f| f.name().clone())
        .collect();
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut aggs = Vec::with_capacity(columns.len() * STATISTICS.len());
    for name in &columns {
        let value = cast(col(name.as_str()), DataType::Float64);
        aggs.push(count(col(name.as_str())).alias(alias(name, "count")));
        aggs.push(avg(value.clone()).alias(alias(name, "mean")));
        aggs.push(stddev(value.clone()).alias(alias(name, "stddev")));
        aggs.push(min(value.clone()).alias(alias(name, "min")));
        aggs.push(max(value).alias(alias(name, "max")));
    }

    let batches = df
        .clone()
        .aggregate(vec![], aggs)?
        .collect()
        .await
        .context("descriptive statistics failed")?;
    let batch = batches
        .iter()
        .find(|b| b.num_rows() > 0)
        .context("descriptive statistics returned no rows")?;

    let mut summaries = Vec::with_capacity(columns.len());
    for name in columns {
        let counts = batch
            .column_by_name(&alias(&name, "count"))
            .with_context(|| format!("missing count for {name}"))?
            .as_primitive::<Int64Type>();
        summaries.push(ColumnSummary {
            count: counts.value(0),
            mean: float_at(batch, &alias(&name, "mean"))?,
            stddev: float_at(batch, &alias(&name, "stddev"))?,
            min: float_at(batch, &alias(&name, "min"))?,
            max: float_at(batch, &alias(&name, "max"))?,
            column: name,
        });
    }
    Ok(summaries)
}

/// One row per statistic, one column per summarised field.
pub fn summary_batch(summaries: &[ColumnSummary]) -> Result<RecordBatch> {
    let mut fields = vec![Field::new("summary", DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(STATISTICS.to_vec()))];

    for summary in summaries {
        fields.push(Field::new(&summary.column, DataType::Float64, true));
        let values: Float64Array = STATISTICS.iter().map(|s| summary.statistic(s)).collect();
        arrays.push(Arc::new(values));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("building summary table failed")
}
