//! Run configuration.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Where to read the raw trips from and where to write the cleaned ones.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Delimited file with a header row.
    pub input: PathBuf,
    /// Single CSV file written at the end of the run, replaced if present.
    pub output: PathBuf,
    /// Target partitions for the session; engine default when unset.
    pub target_partitions: Option<usize>,
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            target_partitions: None,
        }
    }

    pub fn with_target_partitions(mut self, partitions: usize) -> Self {
        self.target_partitions = Some(partitions);
        self
    }
}

pub fn validate_input(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(anyhow!("Input file does not exist: {}", input.display()));
    }
    if !input.is_file() {
        return Err(anyhow!("Input path is not a file: {}", input.display()));
    }
    if input.extension().is_none() {
        tracing::warn!(
            "input {} has no extension, reading it as CSV anyway",
            input.display()
        );
    }
    Ok(())
}
