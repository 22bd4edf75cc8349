//! Writing the cleaned trips back out.

use anyhow::{Context, Result};
use datafusion::config::CsvOptions;
use datafusion::dataframe::DataFrameWriteOptions;
use datafusion::prelude::DataFrame;
use std::fs;
use std::path::Path;

/// Writes `df` as one CSV file with a header, replacing whatever is at `dest`.
pub async fn write_single_csv(df: DataFrame, dest: &Path) -> Result<()> {
    clear_destination(dest)?;
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let location = dest
        .to_str()
        .with_context(|| format!("output path is not valid UTF-8: {}", dest.display()))?;

    df.write_csv(
        location,
        DataFrameWriteOptions::new().with_single_file_output(true),
        Some(CsvOptions::default().with_has_header(true)),
    )
    .await
    .with_context(|| format!("failed to write {location}"))?;
    Ok(())
}

fn clear_destination(dest: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(dest) else {
        return Ok(());
    };
    tracing::info!("overwriting existing output at {}", dest.display());
    if meta.is_dir() {
        fs::remove_dir_all(dest)
    } else {
        fs::remove_file(dest)
    }
    .with_context(|| format!("failed to remove previous output {}", dest.display()))
}
