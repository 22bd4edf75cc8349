//! Console rendering of frames, schemas and stage banners.

use anyhow::Result;
use datafusion::arrow::datatypes::Schema;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::arrow::util::pretty::pretty_format_batches;
use datafusion::prelude::DataFrame;
use std::collections::BTreeMap;

/// Rows printed when sampling a frame.
pub const SAMPLE_ROWS: usize = 5;

pub fn print_banner(title: &str) {
    println!("\n==============================");
    println!("{title}");
    println!("==============================");
}

pub async fn print_df(title: &str, df: DataFrame) -> Result<()> {
    let batches = df.collect().await?;
    print_batches(title, &batches)
}

pub async fn print_sample(title: &str, df: &DataFrame) -> Result<()> {
    print_df(title, df.clone().limit(0, Some(SAMPLE_ROWS))?).await
}

pub fn print_batches(title: &str, batches: &[RecordBatch]) -> Result<()> {
    let formatted = pretty_format_batches(batches)?;
    println!("\n--- {} ---", title);
    println!("{}", formatted);
    Ok(())
}

/// Tree layout of a schema, one field per line.
pub fn format_schema(schema: &Schema) -> String {
    let mut out = String::from("root\n");
    for field in schema.fields() {
        out.push_str(&format!(
            " |-- {}: {} (nullable = {})\n",
            field.name(),
            field.data_type(),
            field.is_nullable()
        ));
    }
    out
}

pub fn print_schema(title: &str, schema: &Schema) {
    println!("\n--- {} ---", title);
    print!("{}", format_schema(schema));
}

pub fn print_counts<'a>(title: &str, counts: impl IntoIterator<Item = (&'a str, usize)>) {
    println!("\n--- {} ---", title);
    for (label, n) in counts {
        println!("{label} : {n}");
    }
}

/// First `limit` entries of a reduced map, as `(key, value)` pairs.
pub fn print_pairs(title: &str, pairs: &BTreeMap<i32, f64>, limit: usize) {
    let shown: Vec<String> = pairs
        .iter()
        .take(limit)
        .map(|(k, v)| format!("({k}, {v:.2})"))
        .collect();
    println!("\n--- {} ---", title);
    println!("[{}]", shown.join(", "));
}
