use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::ProcessorConfig;
use crate::processors::ParallelProcessor;
use crate::utils::progress::ProgressReporter;
use crate::writers::{AnomalyWriter, ReportWriter};
use tracing::warn;

pub async fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Aggregate {
            input,
            output,
            workers,
            memory_threshold,
            mmap,
            json,
        } => {
            let config = ProcessorConfig::new(workers)
                .with_memory_threshold(memory_threshold)
                .with_mmap(mmap);
            let processor = ParallelProcessor::new(config);

            let progress = ProgressReporter::new_spinner("Aggregating...", json);
            let outcome = processor.aggregate_file(&input).await?;
            progress.finish_and_clear();

            if !outcome.is_complete() {
                warn!(
                    failed_parts = ?outcome.failed_parts,
                    "result is incomplete: some worker ranges could not be read"
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.stats)?);
            } else {
                let mut stations: Vec<&String> = outcome.stats.keys().collect();
                stations.sort();
                for station in stations {
                    let stat = &outcome.stats[station];
                    println!(
                        "{};{:.2};{:.2};{:.2}",
                        station,
                        stat.mean(),
                        stat.min,
                        stat.max
                    );
                }
            }

            if let Some(path) = output {
                ReportWriter::new().write_summary(&outcome.stats, &path)?;
                eprintln!("Summary written to {}", path.display());
            }
        }

        Commands::Anomalies {
            input,
            output,
            workers,
            json,
        } => {
            let config = ProcessorConfig::new(workers);
            let processor = ParallelProcessor::new(config);

            let progress = ProgressReporter::new_spinner("Detecting anomalies...", json);
            let report = processor.detect_anomalies_file(&input).await?;
            progress.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&report.anomalies)?);
            } else {
                for anomaly in &report.anomalies {
                    println!(
                        "{},{:.1},{}",
                        anomaly.station, anomaly.temp, anomaly.reason
                    );
                }
            }
            eprintln!(
                "Total anomalies: {} (spikes: {})",
                report.total_anomalies, report.spike_count
            );

            if let Some(path) = output {
                AnomalyWriter::new().write_anomalies(&report.anomalies, &path)?;
                eprintln!("Anomalies written to {}", path.display());
            }
        }
    }

    Ok(())
}
