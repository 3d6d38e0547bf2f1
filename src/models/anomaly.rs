use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a reading was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyReason {
    /// Reading outside the physically plausible range [-50, 60].
    Extreme,
    /// Reading differs from the station's previous reading by more than 20
    /// degrees.
    Spike,
}

impl fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyReason::Extreme => write!(f, "extreme"),
            AnomalyReason::Spike => write!(f, "spike"),
        }
    }
}

/// One flagged reading, emitted by a detector shard and owned by the
/// collector that receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub station: String,
    pub temp: f32,
    pub reason: AnomalyReason,
}

impl Anomaly {
    pub fn new(station: String, temp: f32, reason: AnomalyReason) -> Self {
        Self {
            station,
            temp,
            reason,
        }
    }
}
