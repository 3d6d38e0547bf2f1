use crate::error::Result;
use crate::models::{ProcessorConfig, TempStat};
use crate::processors::{merge_results, AnomalyPipeline, AnomalyReport, Ingestor};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Final aggregation result plus the degraded-result signal from ingest.
#[derive(Debug)]
pub struct AggregateOutcome {
    pub stats: HashMap<String, TempStat>,
    pub failed_parts: Vec<usize>,
}

impl AggregateOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_parts.is_empty()
    }
}

/// Async facade over the blocking core, for callers living on a tokio
/// runtime. The heavy work runs on blocking threads; the facade only ties
/// ingest, merge and the anomaly pipeline together.
pub struct ParallelProcessor {
    config: ProcessorConfig,
}

impl ParallelProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Aggregate per-station statistics for a file on disk.
    pub async fn aggregate_file(&self, path: &Path) -> Result<AggregateOutcome> {
        let config = self.config.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            let size = file.metadata()?.len();
            debug!(path = %path.display(), size, "aggregating file");

            let outcome = Ingestor::new(config)?.ingest(file, size)?;
            let failed_parts = outcome.failed_parts;
            Ok(AggregateOutcome {
                stats: merge_results(outcome.worker_maps),
                failed_parts,
            })
        })
        .await?
    }

    /// Run the anomaly pipeline over a file on disk.
    pub async fn detect_anomalies_file(&self, path: &Path) -> Result<AnomalyReport> {
        let config = self.config.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            debug!(path = %path.display(), "detecting anomalies");
            AnomalyPipeline::new(config)?.detect(file)
        })
        .await?
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}
