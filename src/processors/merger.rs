use crate::models::TempStat;
use crate::readers::StationMap;
use std::collections::HashMap;

/// Combine per-worker maps into the final result, turning the raw station
/// byte keys into owned strings exactly once.
///
/// The fold is associative and commutative: `sum` and `count` add, `min`
/// and `max` fold, so the number and order of input maps never changes the
/// outcome. A station present in only one map passes through unchanged.
pub fn merge_results(parts: Vec<StationMap>) -> HashMap<String, TempStat> {
    let mut merged: StationMap = StationMap::new();
    for part in parts {
        for (station, stat) in part {
            merged
                .entry(station)
                .and_modify(|existing| existing.merge(&stat))
                .or_insert(stat);
        }
    }

    // Lossy conversion can map two distinct non-UTF-8 byte keys to the same
    // string; fold such collisions instead of dropping one of them.
    let mut result: HashMap<String, TempStat> = HashMap::with_capacity(merged.len());
    for (station, stat) in merged {
        result
            .entry(String::from_utf8_lossy(&station).into_owned())
            .and_modify(|existing| existing.merge(&stat))
            .or_insert(stat);
    }
    result
}
