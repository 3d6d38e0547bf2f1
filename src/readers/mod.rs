pub mod chunk_decoder;
pub mod line_reader;

pub use chunk_decoder::{ChunkDecoder, StationMap};
pub use line_reader::LineReader;
