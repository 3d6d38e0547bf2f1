use crate::error::{ProcessingError, Result};
use crate::models::ProcessorConfig;
use crate::processors::ChunkPlanner;
use crate::readers::{ChunkDecoder, StationMap};
use rayon::prelude::*;
use std::io::Read;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Result of one ingest call: one aggregation map per decode worker, plus
/// the indices of any workers whose range could not be read.
///
/// Per-line parse failures are absorbed inside the workers; `failed_parts`
/// only records worker-level I/O failures, so the caller can distinguish a
/// degraded result from a complete one instead of guessing.
#[derive(Debug)]
pub struct IngestOutcome {
    pub worker_maps: Vec<StationMap>,
    pub failed_parts: Vec<usize>,
}

impl IngestOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_parts.is_empty()
    }
}

/// Chooses between the in-memory single-pass path for small inputs and the
/// spill-to-disk, chunked multi-worker path for large ones.
pub struct Ingestor {
    config: ProcessorConfig,
}

impl Ingestor {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    /// Ingest a sequential byte stream of `declared_size` bytes.
    ///
    /// At or below the memory threshold the stream is decoded in a single
    /// pass. Above it the stream is spilled once to a temporary file to
    /// gain random access, chunk-planned, and decoded by one worker per
    /// range on a dedicated thread pool. The spill file is removed on every
    /// exit path when the `NamedTempFile` drops.
    pub fn ingest<R: Read>(&self, reader: R, declared_size: u64) -> Result<IngestOutcome> {
        if declared_size == 0 {
            return Err(ProcessingError::Config(
                "input is empty or has no declared size".to_string(),
            ));
        }

        if declared_size <= self.config.memory_threshold {
            debug!(declared_size, "ingesting in memory");
            self.ingest_in_memory(reader)
        } else {
            debug!(
                declared_size,
                workers = self.config.workers,
                "ingesting via temporary spill"
            );
            self.ingest_spilled(reader)
        }
    }

    fn ingest_in_memory<R: Read>(&self, reader: R) -> Result<IngestOutcome> {
        let map = ChunkDecoder::new().decode_stream(reader)?;
        Ok(IngestOutcome {
            worker_maps: vec![map],
            failed_parts: Vec::new(),
        })
    }

    fn ingest_spilled<R: Read>(&self, mut reader: R) -> Result<IngestOutcome> {
        let mut spill = NamedTempFile::new()?;
        let spilled = std::io::copy(&mut reader, spill.as_file_mut())?;
        debug!(bytes = spilled, "spilled input to temporary storage");

        let ranges = ChunkPlanner::new().plan(spill.as_file_mut(), spilled, self.config.workers)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let path = spill.path();
        let use_mmap = self.config.use_mmap;
        let results: Vec<(usize, Result<StationMap>)> = pool.install(|| {
            ranges
                .par_iter()
                .enumerate()
                .map(|(part, range)| {
                    let decoder = ChunkDecoder::new();
                    let result = if use_mmap {
                        decoder.decode_range_mmap(path, *range)
                    } else {
                        decoder.decode_range(path, *range)
                    };
                    (part, result)
                })
                .collect()
        });

        let mut worker_maps = Vec::with_capacity(results.len());
        let mut failed_parts = Vec::new();
        for (part, result) in results {
            match result {
                Ok(map) => worker_maps.push(map),
                Err(e) => {
                    warn!(part, error = %e, "decode worker failed; its range is missing from the result");
                    failed_parts.push(part);
                }
            }
        }

        Ok(IngestOutcome {
            worker_maps,
            failed_parts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::merge_results;
    use std::io::Cursor;

    fn config(workers: usize, threshold: u64) -> ProcessorConfig {
        ProcessorConfig::new(workers).with_memory_threshold(threshold)
    }

    fn sample_input(lines: usize) -> Vec<u8> {
        let mut data = Vec::new();
        for i in 0..lines {
            let station = match i % 3 {
                0 => "Oslo",
                1 => "Paris",
                _ => "Bergen",
            };
            // Halves only, so sums stay exact in f32 regardless of the
            // order workers add them in.
            data.extend_from_slice(format!("{};{}.{}\n", station, i % 40, (i % 2) * 5).as_bytes());
        }
        data
    }

    #[test]
    fn test_empty_input_rejected() {
        let ingestor = Ingestor::new(config(2, 1024)).unwrap();
        let result = ingestor.ingest(Cursor::new(Vec::new()), 0);
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }

    #[test]
    fn test_small_input_uses_single_pass() {
        let data = sample_input(10);
        let ingestor = Ingestor::new(config(4, 1 << 20)).unwrap();
        let outcome = ingestor.ingest(Cursor::new(data), 10).unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.worker_maps.len(), 1);
    }

    #[test]
    fn test_large_input_splits_across_workers() {
        let data = sample_input(200);
        // Threshold of one byte forces the spill path.
        let ingestor = Ingestor::new(config(4, 1)).unwrap();
        let outcome = ingestor
            .ingest(Cursor::new(data.clone()), data.len() as u64)
            .unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.worker_maps.len(), 4);
    }

    #[test]
    fn test_mmap_spill_path_matches_buffered() {
        let data = sample_input(300);

        let buffered = {
            let ingestor = Ingestor::new(config(4, 1)).unwrap();
            let outcome = ingestor
                .ingest(Cursor::new(data.clone()), data.len() as u64)
                .unwrap();
            merge_results(outcome.worker_maps)
        };

        let mapped = {
            let ingestor = Ingestor::new(config(4, 1).with_mmap(true)).unwrap();
            let outcome = ingestor
                .ingest(Cursor::new(data.clone()), data.len() as u64)
                .unwrap();
            merge_results(outcome.worker_maps)
        };

        assert_eq!(mapped, buffered);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data = sample_input(500);

        let sequential = {
            let ingestor = Ingestor::new(config(1, u64::MAX)).unwrap();
            let outcome = ingestor
                .ingest(Cursor::new(data.clone()), data.len() as u64)
                .unwrap();
            merge_results(outcome.worker_maps)
        };

        for workers in [1, 2, 3, 8] {
            let ingestor = Ingestor::new(config(workers, 1)).unwrap();
            let outcome = ingestor
                .ingest(Cursor::new(data.clone()), data.len() as u64)
                .unwrap();
            let parallel = merge_results(outcome.worker_maps);
            assert_eq!(parallel, sequential, "workers = {}", workers);
        }
    }
}
