use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use tempstats::models::{AnomalyReason, ProcessorConfig};
use tempstats::processors::ParallelProcessor;
use tempstats::writers::ReportWriter;

/// Build a measurement file whose temperatures are all exact halves, so
/// f32 sums are identical regardless of how workers partition the input.
fn write_measurements(lines: usize) -> NamedTempFile {
    let stations = ["Oslo", "Paris", "Bergen", "Rome", "Reykjavik"];
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for i in 0..lines {
        let station = stations[i % stations.len()];
        let whole = (i % 35) as i32 - 10;
        let frac = (i % 2) * 5;
        writeln!(file, "{};{}.{}", station, whole, frac).unwrap();
    }
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_parallel_aggregation_refines_sequential() {
    let file = write_measurements(5_000);

    let sequential = ParallelProcessor::new(
        ProcessorConfig::new(1).with_memory_threshold(u64::MAX),
    )
    .aggregate_file(file.path())
    .await
    .unwrap();
    assert!(sequential.is_complete());

    for workers in [1, 2, 4, 7] {
        // A one-byte threshold forces the spill-and-chunk path.
        let parallel = ParallelProcessor::new(
            ProcessorConfig::new(workers).with_memory_threshold(1),
        )
        .aggregate_file(file.path())
        .await
        .unwrap();

        assert!(parallel.is_complete());
        assert_eq!(
            parallel.stats, sequential.stats,
            "parallel run with {} workers diverged",
            workers
        );
    }
}

#[tokio::test]
async fn test_aggregate_counts_every_line() {
    let file = write_measurements(1_000);
    let outcome = ParallelProcessor::new(ProcessorConfig::new(4).with_memory_threshold(1))
        .aggregate_file(file.path())
        .await
        .unwrap();

    let total_count: i32 = outcome.stats.values().map(|s| s.count).sum();
    assert_eq!(total_count, 1_000);
    assert_eq!(outcome.stats.len(), 5);
}

#[tokio::test]
async fn test_anomaly_detection_end_to_end() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "Oslo;10.0\nParis;15.0\nOslo;35.0\nParis;16.0\nOslo;-60.0\nParis;80.0\n"
    )
    .unwrap();
    file.flush().unwrap();

    let report = ParallelProcessor::new(ProcessorConfig::new(4))
        .detect_anomalies_file(file.path())
        .await
        .unwrap();

    assert_eq!(report.total_anomalies, 3);
    assert_eq!(report.spike_count, 1);

    let oslo: Vec<_> = report
        .anomalies
        .iter()
        .filter(|a| a.station == "Oslo")
        .collect();
    assert_eq!(oslo.len(), 2);
    assert_eq!(oslo[0].reason, AnomalyReason::Spike);
    assert_eq!(oslo[1].reason, AnomalyReason::Extreme);

    let paris: Vec<_> = report
        .anomalies
        .iter()
        .filter(|a| a.station == "Paris")
        .collect();
    assert_eq!(paris.len(), 1);
    assert_eq!(paris[0].reason, AnomalyReason::Extreme);
    assert_eq!(paris[0].temp, 80.0);
}

#[tokio::test]
async fn test_summary_report_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Oslo;10.0\nOslo;20.0\nBergen;-4.5\n").unwrap();
    file.flush().unwrap();

    let outcome = ParallelProcessor::new(ProcessorConfig::new(2))
        .aggregate_file(file.path())
        .await
        .unwrap();

    let report = NamedTempFile::new().unwrap();
    ReportWriter::new()
        .write_summary(&outcome.stats, report.path())
        .unwrap();

    let content = std::fs::read_to_string(report.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["Bergen;-4.50;-4.50;-4.50", "Oslo;15.00;10.00;20.00"]);
}

#[tokio::test]
async fn test_missing_input_is_an_error() {
    let result = ParallelProcessor::new(ProcessorConfig::new(2))
        .aggregate_file(std::path::Path::new("/nonexistent/measurements.txt"))
        .await;
    assert!(result.is_err());
}
