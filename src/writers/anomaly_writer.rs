use crate::error::Result;
use crate::models::Anomaly;
use std::path::Path;

/// Writes detected anomalies as comma-separated rows with a header,
/// preserving arrival order.
pub struct AnomalyWriter;

impl AnomalyWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_anomalies(&self, anomalies: &[Anomaly], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["station", "temp", "reason"])?;

        for anomaly in anomalies {
            let temp = format!("{:.1}", anomaly.temp);
            let reason = anomaly.reason.to_string();
            writer.write_record([anomaly.station.as_str(), temp.as_str(), reason.as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for AnomalyWriter {
    fn default() -> Self {
        Self::new()
    }
}
