use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use weather_etl::config::Config;
use weather_etl::error::Result;
use weather_etl::logging;
use weather_etl::pipeline::Pipeline;
use weather_etl::scheduler::Scheduler;
use weather_etl::storage::{CleanSink, InMemoryCleanSink, InMemoryRawSource, RawSource};
use weather_etl::types::RawRecord;

#[derive(Parser)]
#[command(name = "weather_etl")]
#[command(about = "Weather submission cleaning pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and print the run summary
    RunOnce {
        /// JSON file with raw submissions to seed the in-memory raw store
        #[arg(long)]
        input: Option<String>,
    },
    /// Run the pipeline on a fixed interval until stopped
    Schedule {
        /// Minutes between runs (overrides the config file)
        #[arg(long)]
        interval_mins: Option<u64>,
        /// JSON file with raw submissions to seed the in-memory raw store
        #[arg(long)]
        input: Option<String>,
    },
}

/// Loads raw submissions from a JSON array file into the raw store.
async fn seed_from_file(source: &dyn RawSource, path: &str) -> Result<usize> {
    let content = std::fs::read_to_string(path)?;
    let mut records: Vec<RawRecord> = serde_json::from_str(&content)?;
    let count = records.len();
    for record in records.iter_mut() {
        source.insert(record).await?;
    }
    info!("Seeded {} raw records from {}", count, path);
    Ok(count)
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let source: Arc<dyn RawSource> = Arc::new(InMemoryRawSource::new());
    let sink: Arc<dyn CleanSink> = Arc::new(InMemoryCleanSink::new());

    match cli.command {
        Commands::RunOnce { input } => {
            println!("🔄 Running pipeline once...");
            if let Some(path) = input {
                seed_from_file(source.as_ref(), &path).await?;
            }

            let pipeline = Pipeline::new(&config, source, sink);
            match pipeline.try_run_once().await {
                Ok(Some(summary)) => {
                    println!("\n📊 Run summary:");
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                Ok(None) => {
                    // Unreachable with a fresh pipeline, kept for completeness
                    println!("⚠️  A run is already in flight");
                }
                Err(e) => {
                    error!("Pipeline run failed: {}", e);
                    println!("❌ Pipeline run failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Schedule {
            interval_mins,
            input,
        } => {
            if let Some(path) = input {
                seed_from_file(source.as_ref(), &path).await?;
            }

            let interval = interval_mins.unwrap_or(config.interval_minutes);
            println!("⏱️  Scheduling pipeline every {} minutes...", interval);

            let pipeline = Arc::new(Pipeline::new(&config, source, sink));
            let scheduler = Scheduler::new(pipeline, interval);
            scheduler.run().await;
        }
    }
    Ok(())
}
