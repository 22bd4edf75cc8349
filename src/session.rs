//! Engine session scoped to a single run.

use datafusion::prelude::{SessionConfig, SessionContext};

/// Owns the DataFusion context for one pipeline run.
///
/// Acquired with [`TaxiSession::open`] and released with
/// [`TaxiSession::close`], which consumes it so a closed session cannot be
/// handed to another run.
pub struct TaxiSession {
    name: String,
    ctx: SessionContext,
}

impl TaxiSession {
    pub fn open(name: &str, target_partitions: Option<usize>) -> Self {
        let mut config = SessionConfig::new();
        if let Some(partitions) = target_partitions {
            config = config.with_target_partitions(partitions.max(1));
        }
        let ctx = SessionContext::new_with_config(config);
        tracing::info!(
            session = name,
            partitions = ctx.copied_config().target_partitions(),
            "session opened"
        );
        Self {
            name: name.to_string(),
            ctx,
        }
    }

    pub fn ctx(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn close(self) {
        tracing::info!(session = %self.name, "session closed");
    }
}
