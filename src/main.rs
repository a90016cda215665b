//! CLI entry point for the BLS pipeline.
//!
//! Runs the same collector and analyzer the Lambda functions run, from a
//! workstation, plus a helper to inspect what is stored in the bucket.

use anyhow::Result;
use bls_pipeline::{
    analyzer::analyze,
    collector::run_collector,
    config::{Config, ReportParams},
    data::{LocalFiles, StoreSource},
    fetch::{BasicClient, WithUserAgent},
    output::{log_reports, write_report_csvs},
    status::{analyzer_status, collector_status},
    store::{ObjectStore, S3Store},
    telemetry,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bls_pipeline")]
#[command(about = "Collect BLS and population data and report on it", long_about = None)]
struct Cli {
    /// S3 bucket to use instead of BUCKET_NAME
    #[arg(long, global = true)]
    bucket: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror the BLS directory and upload the population API payload
    Collect,
    /// Load both tables and run the reports
    Analyze {
        /// Read the time-series table from a local file instead of S3
        #[arg(long, requires = "population_file")]
        timeseries_file: Option<PathBuf>,

        /// Read the population table from a local file instead of S3
        #[arg(long, requires = "timeseries_file")]
        population_file: Option<PathBuf>,

        /// Directory to write report CSVs to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the status payload the Lambda handler would return
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List stored object keys under a prefix
    List {
        #[arg(default_value = "")]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let _log_guard = telemetry::init_cli()?;

    let cli = Cli::parse();
    let bucket = cli.bucket;
    let load_config = || {
        Config::from_lookup(|name| match name {
            "BUCKET_NAME" if bucket.is_some() => bucket.clone(),
            _ => std::env::var(name).ok(),
        })
    };

    match cli.command {
        Commands::Collect => {
            let config = load_config()?;
            let client = WithUserAgent::new(BasicClient::new()?, &config.user_agent)?;
            let store = S3Store::from_env(&config.bucket).await;

            let outcome = run_collector(&client, &store, &config).await;
            let status = collector_status(&outcome);
            info!(status = status.status_code, body = %status.body, "Collector finished");

            if !outcome.is_success() {
                return Err(anyhow::anyhow!("collector finished with errors"));
            }
        }
        Commands::Analyze {
            timeseries_file,
            population_file,
            output_dir,
            json,
        } => {
            let result = match (timeseries_file, population_file) {
                (Some(timeseries), Some(population)) => {
                    let params = ReportParams::from_env()?;
                    let source = LocalFiles {
                        timeseries,
                        population,
                    };
                    analyze(&source, &params).await
                }
                _ => {
                    let config = load_config()?;
                    let store = S3Store::from_env(&config.bucket).await;
                    let source =
                        StoreSource::new(store, &config.timeseries_key, &config.population_key);
                    analyze(&source, &config.report).await
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&analyzer_status(&result))?);
            }

            match result {
                Ok(reports) => {
                    log_reports(&reports);
                    if let Some(dir) = output_dir {
                        write_report_csvs(&dir, &reports)?;
                    }
                }
                Err(e) => {
                    error!(kind = e.kind(), error = %e, "Analysis failed");
                    return Err(e.into());
                }
            }
        }
        Commands::List { prefix } => {
            let config = load_config()?;
            let store = S3Store::from_env(&config.bucket).await;

            let keys = store.list(&prefix).await?;
            info!(bucket = %store.bucket(), prefix = %prefix, count = keys.len(), "Objects listed");
            for key in keys {
                println!("{key}");
            }
        }
    }

    Ok(())
}
