use crate::codec::{decode_temperature, split_line};
use crate::error::Result;
use crate::models::{ByteRange, TempStat};
use crate::utils::constants::{DECODE_BLOCK_SIZE, LINE_TERMINATOR};
use memmap2::Mmap;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Per-worker aggregation map. Keys are the raw station bytes so lookups
/// can borrow straight from the read buffer; an owned key is allocated
/// only the first time a station is seen, which is this worker's interning
/// cache. Keys become strings once, at merge time.
pub type StationMap = HashMap<Vec<u8>, TempStat>;

/// Streams one byte range (or a whole small input) and accumulates
/// per-station statistics into a private map. Workers share no mutable
/// state, so any number of them can run over disjoint ranges without
/// locking.
pub struct ChunkDecoder {
    block_size: usize,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self {
            block_size: DECODE_BLOCK_SIZE,
        }
    }

    pub fn with_block_size(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Decode an entire sequential stream in fixed-size blocks, carrying
    /// the partial trailing line between reads.
    pub fn decode_stream<R: Read>(&self, mut reader: R) -> Result<StationMap> {
        let mut stats = StationMap::new();
        let mut buf = vec![0u8; self.block_size];
        let mut leftover: Vec<u8> = Vec::new();

        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }

            let mut block = std::mem::take(&mut leftover);
            block.extend_from_slice(&buf[..n]);

            match block.iter().rposition(|&b| b == LINE_TERMINATOR) {
                Some(last) => {
                    for line in block[..last].split(|&b| b == LINE_TERMINATOR) {
                        accumulate_line(&mut stats, line);
                    }
                    leftover = block[last + 1..].to_vec();
                }
                None => {
                    // No complete line yet; keep accumulating.
                    leftover = block;
                }
            }
        }

        if !leftover.is_empty() {
            accumulate_line(&mut stats, &leftover);
        }

        Ok(stats)
    }

    /// Decode one planned range of a file on disk.
    pub fn decode_range(&self, path: &Path, range: ByteRange) -> Result<StationMap> {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(range.offset))?;
        self.decode_stream(file.take(range.size))
    }

    /// Decode one planned range through a memory map instead of buffered
    /// reads. Same results as `decode_range`; useful when the spill file is
    /// hot in page cache.
    pub fn decode_range_mmap(&self, path: &Path, range: ByteRange) -> Result<StationMap> {
        let file = File::open(path)?;
        // Safety: the spill file is private to this run and not truncated
        // while mapped.
        let mmap = unsafe { Mmap::map(&file)? };
        let slice = &mmap[range.offset as usize..range.end() as usize];

        let mut stats = StationMap::new();
        for line in slice.split(|&b| b == LINE_TERMINATOR) {
            accumulate_line(&mut stats, line);
        }
        Ok(stats)
    }
}

impl Default for ChunkDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold one complete line into the map. Malformed lines (missing
/// separator, bad temperature field) are dropped silently.
fn accumulate_line(stats: &mut StationMap, line: &[u8]) {
    if line.is_empty() {
        return;
    }
    let Some(split) = split_line(line) else {
        return;
    };
    let Ok(temp) = decode_temperature(split.temperature) else {
        return;
    };

    if let Some(stat) = stats.get_mut(split.station) {
        stat.record(temp);
    } else {
        stats.insert(split.station.to_vec(), TempStat::new(temp));
    }
}
