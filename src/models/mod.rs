pub mod anomaly;
pub mod chunk;
pub mod config;
pub mod line;
pub mod stat;

pub use anomaly::{Anomaly, AnomalyReason};
pub use chunk::ByteRange;
pub use config::ProcessorConfig;
pub use line::{LineSplit, OwnedLineSplit};
pub use stat::TempStat;
