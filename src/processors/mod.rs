pub mod anomaly;
pub mod chunk_planner;
pub mod ingest;
pub mod merger;
pub mod parallel_processor;

pub use anomaly::{AnomalyPipeline, AnomalyReport};
pub use chunk_planner::ChunkPlanner;
pub use ingest::{IngestOutcome, Ingestor};
pub use merger::merge_results;
pub use parallel_processor::{AggregateOutcome, ParallelProcessor};
