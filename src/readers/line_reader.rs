use crate::error::Result;
use crate::utils::constants::{LINE_TERMINATOR, READER_BLOCK_SIZE};
use crossbeam::channel::Sender;
use std::io::Read;

/// Reads a raw byte stream in large blocks and emits complete lines into a
/// bounded channel, carrying the partial trailing line between reads. The
/// first stage of the anomaly pipeline.
///
/// A full channel blocks this reader, which is the pipeline's natural
/// backpressure. Dropping the sender on return signals end-of-stream to the
/// downstream stage.
pub struct LineReader {
    block_size: usize,
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            block_size: READER_BLOCK_SIZE,
        }
    }

    pub fn with_block_size(block_size: usize) -> Self {
        Self { block_size }
    }

    pub fn read_lines<R: Read>(&self, mut reader: R, out: Sender<Vec<u8>>) -> Result<()> {
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
                        if !line.is_empty() && out.send(line.to_vec()).is_err() {
                            // Downstream hung up; nothing left to feed.
                            return Ok(());
                        }
                    }
                    leftover = block[last + 1..].to_vec();
                }
                None => {
                    leftover = block;
                }
            }
        }

        if !leftover.is_empty() {
            let _ = out.send(leftover);
        }

        Ok(())
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}
