use crate::utils::constants::DEFAULT_MEMORY_THRESHOLD;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tempstats",
    about = "Parallel aggregator and anomaly detector for station temperature files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate per-station statistics (sum, min, max, count)
    Aggregate {
        /// Input file of <station>;<temperature> lines
        input: PathBuf,

        /// Write a station;mean;min;max summary file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of decode workers
        #[arg(short, long, default_value_t = num_cpus::get())]
        workers: usize,

        /// Inputs above this many bytes are spilled to disk and chunked
        #[arg(long, default_value_t = DEFAULT_MEMORY_THRESHOLD)]
        memory_threshold: u64,

        /// Decode spilled ranges through a memory map
        #[arg(long)]
        mmap: bool,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Flag extreme and sharply-changed readings per station
    Anomalies {
        /// Input file of <station>;<temperature> lines
        input: PathBuf,

        /// Write detected anomalies as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of detector shards
        #[arg(short, long, default_value_t = num_cpus::get())]
        workers: usize,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
