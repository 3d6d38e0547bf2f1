use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{DEFAULT_MEMORY_THRESHOLD, DEFAULT_QUEUE_CAPACITY};

/// Runtime configuration handed to the core by its caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProcessorConfig {
    /// Number of concurrent decode workers / detector shards.
    #[validate(range(min = 1))]
    pub workers: usize,

    /// Inputs at or below this size (bytes) are decoded in memory in a
    /// single pass; larger inputs are spilled to disk and chunked.
    #[validate(range(min = 1))]
    pub memory_threshold: u64,

    /// Capacity of the bounded queues between anomaly pipeline stages.
    #[validate(range(min = 1))]
    pub queue_capacity: usize,

    /// Decode spilled ranges through a memory map instead of buffered
    /// reads.
    pub use_mmap: bool,
}

impl ProcessorConfig {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            memory_threshold: DEFAULT_MEMORY_THRESHOLD,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            use_mmap: false,
        }
    }

    pub fn with_memory_threshold(mut self, memory_threshold: u64) -> Self {
        self.memory_threshold = memory_threshold;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Reject bad configuration before any I/O is attempted.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
