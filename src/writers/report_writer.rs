use crate::error::Result;
use crate::models::TempStat;
use std::collections::HashMap;
use std::path::Path;

/// Writes the per-station summary as a semicolon-delimited text file, one
/// line per station sorted lexicographically: `station;mean;min;max` with
/// two-decimal formatting.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_summary(&self, stats: &HashMap<String, TempStat>, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_path(path)?;

        let mut stations: Vec<&String> = stats.keys().collect();
        stations.sort();

        for station in stations {
            let stat = &stats[station];
            let mean = format!("{:.2}", stat.mean());
            let min = format!("{:.2}", stat.min);
            let max = format!("{:.2}", stat.max);
            writer.write_record([station.as_str(), mean.as_str(), min.as_str(), max.as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
