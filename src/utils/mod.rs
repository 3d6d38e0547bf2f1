pub mod constants;
pub mod progress;
