/// A contiguous, newline-aligned slice of the source file, produced by the
/// chunk planner and consumed by exactly one decode worker.
///
/// Planned ranges are disjoint, contiguous, and together cover the whole
/// file; every boundary except the first offset and the final end falls
/// immediately after a line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub offset: u64,
    pub size: u64,
}

impl ByteRange {
    pub fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
