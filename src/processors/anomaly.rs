use crate::codec::{decode_temperature, split_line};
use crate::error::Result;
use crate::models::{Anomaly, AnomalyReason, OwnedLineSplit, ProcessorConfig};
use crate::readers::LineReader;
use crate::utils::constants::{EXTREME_MAX_TEMP, EXTREME_MIN_TEMP, SPIKE_DELTA};
use crossbeam::channel::{bounded, Receiver, Sender};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::sync::atomic::{AtomicU32, Ordering};

/// Everything the anomaly pass produces: the flagged readings in arrival
/// order (no ordering guarantee across shards) and the informational
/// counters.
#[derive(Debug)]
pub struct AnomalyReport {
    pub anomalies: Vec<Anomaly>,
    pub total_anomalies: u32,
    pub spike_count: u32,
}

/// Four-stage concurrent pipeline over bounded channels:
/// reader -> splitter -> N sharded detectors -> collector.
///
/// The splitter routes every entry to the shard selected by hashing the
/// station name, so all readings of one station are evaluated sequentially
/// by the same detector. Each detector exclusively owns its map of last
/// observed temperatures; no lock is shared between shards. Bounded
/// channels give backpressure, and dropped senders signal end-of-stream.
pub struct AnomalyPipeline {
    config: ProcessorConfig,
}

impl AnomalyPipeline {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn detect<R: Read + Send>(&self, reader: R) -> Result<AnomalyReport> {
        let shards = self.config.workers;
        let capacity = self.config.queue_capacity;

        let (line_tx, line_rx) = bounded::<Vec<u8>>(capacity);
        let (anomaly_tx, anomaly_rx) = bounded::<Anomaly>(capacity);

        let mut shard_txs = Vec::with_capacity(shards);
        let mut shard_rxs = Vec::with_capacity(shards);
        for _ in 0..shards {
            let (tx, rx) = bounded::<OwnedLineSplit>(capacity);
            shard_txs.push(tx);
            shard_rxs.push(rx);
        }

        let total_anomalies = AtomicU32::new(0);
        let spike_count = AtomicU32::new(0);

        let anomalies = std::thread::scope(|scope| -> Result<Vec<Anomaly>> {
            let reader_handle =
                scope.spawn(move || LineReader::new().read_lines(reader, line_tx));

            scope.spawn(move || split_and_route(line_rx, shard_txs));

            for entries in shard_rxs {
                let out = anomaly_tx.clone();
                let total = &total_anomalies;
                let spikes = &spike_count;
                scope.spawn(move || detect_shard(entries, out, total, spikes));
            }
            // Detectors hold the only remaining senders; the collector ends
            // when the last one finishes.
            drop(anomaly_tx);

            let anomalies: Vec<Anomaly> = anomaly_rx.iter().collect();

            reader_handle
                .join()
                .expect("line reader thread panicked")?;
            Ok(anomalies)
        })?;

        Ok(AnomalyReport {
            anomalies,
            total_anomalies: total_anomalies.load(Ordering::Relaxed),
            spike_count: spike_count.load(Ordering::Relaxed),
        })
    }
}

/// Second stage: drop malformed lines and route each entry to the shard
/// that owns its station.
fn split_and_route(lines: Receiver<Vec<u8>>, shards: Vec<Sender<OwnedLineSplit>>) {
    let shard_count = shards.len();
    for line in lines {
        let Some(split) = split_line(&line) else {
            continue;
        };
        let shard = station_shard(split.station, shard_count);
        if shards[shard].send(split.to_owned_split()).is_err() {
            return;
        }
    }
}

/// All readings for one station must land on the same shard; beyond that
/// the assignment just needs to spread stations evenly.
fn station_shard(station: &[u8], shard_count: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    station.hash(&mut hasher);
    (hasher.finish() % shard_count as u64) as usize
}

/// One detector shard: applies the extreme and spike rules against its
/// exclusively-owned last-temperature map and emits flagged readings.
fn detect_shard(
    entries: Receiver<OwnedLineSplit>,
    out: Sender<Anomaly>,
    total_anomalies: &AtomicU32,
    spike_count: &AtomicU32,
) {
    // Keyed by the raw station bytes so two distinct non-UTF-8 names can
    // never share a history slot.
    let mut last_temps: HashMap<Vec<u8>, f32> = HashMap::new();

    for entry in entries {
        let Ok(temp) = decode_temperature(&entry.temperature) else {
            continue;
        };
        let previous = last_temps.get(entry.station.as_slice()).copied();

        let reason = if !(EXTREME_MIN_TEMP..=EXTREME_MAX_TEMP).contains(&temp) {
            Some(AnomalyReason::Extreme)
        } else if previous.is_some_and(|prev| (temp - prev).abs() > SPIKE_DELTA) {
            Some(AnomalyReason::Spike)
        } else {
            None
        };

        // The new reading becomes the baseline whether or not it was
        // flagged.
        if let Some(slot) = last_temps.get_mut(entry.station.as_slice()) {
            *slot = temp;
        } else {
            last_temps.insert(entry.station.clone(), temp);
        }

        if let Some(reason) = reason {
            total_anomalies.fetch_add(1, Ordering::Relaxed);
            if reason == AnomalyReason::Spike {
                spike_count.fetch_add(1, Ordering::Relaxed);
            }
            let station = String::from_utf8_lossy(&entry.station).into_owned();
            if out.send(Anomaly::new(station, temp, reason)).is_err() {
                return;
            }
        }
    }
}
