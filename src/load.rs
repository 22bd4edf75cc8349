//! Loading the raw trip file and projecting it onto the pinned columns.

use anyhow::{bail, Context, Result};
use datafusion::arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use datafusion::prelude::*;
use std::path::Path;

use crate::schema::TRIP_COLUMNS;

/// A raw trip file: every column as text, plus the types inference guessed.
pub struct RawTrips {
    pub frame: DataFrame,
    /// Schema inferred from the first rows. Only reported, never used for
    /// casting.
    pub inferred: SchemaRef,
}

/// Reads a delimited file with a header row, every column as text.
///
/// The header is discovered with a first pass, then the file is read again
/// with an all-Utf8 schema so typing happens in [`project`] and never depends
/// on which rows inference happened to sample.
pub async fn load(ctx: &SessionContext, path: &Path) -> Result<RawTrips> {
    let location = path
        .to_str()
        .with_context(|| format!("input path is not valid UTF-8: {}", path.display()))?;
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let header = ctx
        .read_csv(
            location,
            CsvReadOptions::new()
                .has_header(true)
                .file_extension(&extension),
        )
        .await
        .with_context(|| format!("failed to read header of {location}"))?;

    let inferred = header.schema().inner().clone();
    let text_schema = Schema::new(
        inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let frame = ctx
        .read_csv(
            location,
            CsvReadOptions::new()
                .has_header(true)
                .file_extension(&extension)
                .schema(&text_schema),
        )
        .await
        .with_context(|| format!("failed to read {location}"))?;

    Ok(RawTrips { frame, inferred })
}

/// Keeps the eight trip columns, cast to their pinned types.
pub fn project(df: DataFrame) -> Result<DataFrame> {
    let missing: Vec<&str> = TRIP_COLUMNS
        .iter()
        .map(|c| c.name)
        .filter(|name| !df.schema().has_column_with_unqualified_name(name))
        .collect();
    if !missing.is_empty() {
        bail!("input is missing required columns: {}", missing.join(", "));
    }

    let exprs = TRIP_COLUMNS
        .iter()
        .map(|c| cast(col(c.name), c.kind.data_type()).alias(c.name))
        .collect::<Vec<_>>();

    df.select(exprs).context("column projection failed")
}
