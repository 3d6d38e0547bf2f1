use clap::Parser;
use tempstats::cli::{run, Cli};
use tempstats::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
