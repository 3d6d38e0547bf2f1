use crate::error::{ProcessingError, Result};
use crate::models::ByteRange;
use crate::utils::constants::{LINE_TERMINATOR, MAX_LINE_LENGTH};
use std::io::{Read, Seek, SeekFrom};

/// Plans newline-aligned byte ranges so each decode worker receives a
/// contiguous slice that never splits a line.
pub struct ChunkPlanner {
    lookahead: usize,
}

impl ChunkPlanner {
    pub fn new() -> Self {
        Self {
            lookahead: MAX_LINE_LENGTH,
        }
    }

    pub fn with_lookahead(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// Divide `total_size` into `parts` near-equal ranges over a seekable
    /// source.
    ///
    /// Each boundary except the last seeks to the nominal cut point and
    /// scans forward at most `lookahead` bytes for the next line
    /// terminator; the cut lands immediately after it. The final range
    /// always extends to `total_size`, absorbing the remainder. Failing to
    /// find a terminator within the lookahead window means the input is
    /// corrupt or pathologically formatted and fails the whole plan.
    pub fn plan<R: Read + Seek>(
        &self,
        source: &mut R,
        total_size: u64,
        parts: usize,
    ) -> Result<Vec<ByteRange>> {
        if parts == 0 {
            return Err(ProcessingError::Config(
                "chunk plan requires at least one part".to_string(),
            ));
        }

        let window = total_size / parts as u64;
        let mut ranges = Vec::with_capacity(parts);
        let mut buf = vec![0u8; self.lookahead];
        let mut offset = 0u64;

        for part in 0..parts {
            if part == parts - 1 {
                ranges.push(ByteRange::new(offset, total_size - offset));
                break;
            }

            let seek = (offset + window).min(total_size);
            source.seek(SeekFrom::Start(seek))?;
            let n = read_up_to(source, &mut buf)?;
            let pos = buf[..n]
                .iter()
                .position(|&b| b == LINE_TERMINATOR)
                .ok_or(ProcessingError::BoundaryNotFound { part })?;

            let cut = seek + pos as u64 + 1;
            ranges.push(ByteRange::new(offset, cut - offset));
            offset = cut;
        }

        Ok(ranges)
    }
}

impl Default for ChunkPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill as much of `buf` as the source allows; a short read near EOF is
/// not an error here.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn plan_over(data: &[u8], parts: usize) -> Result<Vec<ByteRange>> {
        let mut cursor = Cursor::new(data.to_vec());
        ChunkPlanner::new().plan(&mut cursor, data.len() as u64, parts)
    }

    fn assert_covering(ranges: &[ByteRange], total: u64) {
        let mut expected_offset = 0u64;
        for range in ranges {
            assert_eq!(range.offset, expected_offset, "ranges must be contiguous");
            expected_offset = range.end();
        }
        assert_eq!(expected_offset, total, "ranges must cover the whole input");
    }

    #[test]
    fn test_single_part_covers_everything() {
        let data = b"Oslo;10.0\nParis;12.3\n";
        let ranges = plan_over(data, 1).unwrap();
        assert_eq!(ranges, vec![ByteRange::new(0, data.len() as u64)]);
    }

    #[test]
    fn test_boundaries_fall_after_terminators() {
        let data = b"Oslo;10.0\nParis;12.3\nBergen;5.5\nRome;30.1\n";
        let ranges = plan_over(data, 3).unwrap();

        assert_covering(&ranges, data.len() as u64);
        for range in &ranges[..ranges.len() - 1] {
            assert_eq!(
                data[range.end() as usize - 1],
                b'\n',
                "non-final range must end one byte after a terminator"
            );
        }
    }

    #[test]
    fn test_ranges_are_disjoint_for_many_parts() {
        let mut data = Vec::new();
        for i in 0..50 {
            data.extend_from_slice(format!("Station{};{}.{}\n", i, i, i % 10).as_bytes());
        }
        for parts in 1..=8 {
            let ranges = plan_over(&data, parts).unwrap();
            assert_covering(&ranges, data.len() as u64);
        }
    }

    #[test]
    fn test_missing_terminator_is_fatal() {
        // One line far longer than the lookahead window.
        let data = vec![b'x'; 500];
        let mut cursor = Cursor::new(data.clone());
        let result = ChunkPlanner::new().plan(&mut cursor, data.len() as u64, 2);
        assert!(matches!(
            result,
            Err(ProcessingError::BoundaryNotFound { part: 0 })
        ));
    }

    #[test]
    fn test_zero_parts_rejected() {
        let result = plan_over(b"Oslo;10.0\n", 0);
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }
}
