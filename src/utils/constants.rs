/// Record line layout
pub const SEPARATOR: u8 = b';';
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum plausible record line length; bounds the chunk planner's
/// forward scan for a terminator.
pub const MAX_LINE_LENGTH: usize = 100;

/// Ingest strategy
pub const DEFAULT_MEMORY_THRESHOLD: u64 = 10 << 20; // 10 MiB

/// Streaming block sizes
pub const DECODE_BLOCK_SIZE: usize = 1024 * 1024; // 1 MiB per worker read
pub const READER_BLOCK_SIZE: usize = 4 * 1024 * 1024; // 4 MiB pipeline reads

/// Anomaly thresholds
pub const EXTREME_MIN_TEMP: f32 = -50.0;
pub const EXTREME_MAX_TEMP: f32 = 60.0;
pub const SPIKE_DELTA: f32 = 20.0;

/// Pipeline queue capacity between stages
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;
