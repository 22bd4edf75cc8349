use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nyc_taxi_clean::{run, PipelineConfig};

#[derive(Parser, Debug)]
#[command(
    name = "nyc_taxi_clean",
    about = "NYC Yellow Taxi trip cleaning and exploratory analysis using DataFusion"
)]
struct Args {
    /// Raw trips as CSV with a header row
    /// Example: ./data/yellow_tripdata_2015-01.csv
    #[arg(long, default_value = "./data/yellow_tripdata_2015-01.csv")]
    input: String,

    /// Destination of the cleaned trips (single CSV file, overwritten)
    #[arg(long, default_value = "./clean_taxi_singlefile.csv")]
    output: String,

    /// Target partitions for query execution (defaults to the CPU count)
    #[arg(long)]
    partitions: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = PipelineConfig::new(&args.input, &args.output);
    if let Some(partitions) = args.partitions {
        config = config.with_target_partitions(partitions);
    }

    let outcome = run(&config).await?;

    println!(
        "\n✅ Pipeline finished: {} raw rows, {} cleaned rows.",
        outcome.raw_rows, outcome.cleaned_rows
    );
    Ok(())
}
