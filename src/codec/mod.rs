pub mod line;
pub mod temperature;

pub use line::split_line;
pub use temperature::decode_temperature;
