use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use scale_console::actions::{EnqueueOutcome, JobRequest};
use scale_console::config;
use scale_console::health::{self, DEFAULT_PROBE_TIMEOUT};
use scale_console::http::ConsoleClient;

#[derive(Parser)]
#[command(name = "console-cli")]
#[command(about = "One-shot requests against a load-balanced demo service", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the load balancer (overrides the config file).
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the status endpoint once
    Status {
        /// Number of consecutive requests (shows rotation across instances)
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
    /// Submit a job to the backend queue
    Enqueue {
        /// Job name
        #[arg(default_value = "demo-job")]
        name: String,
    },
    /// Probe the backend health endpoint
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.target.base_url = url;
    }
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    let client = ConsoleClient::from_config(&config)?;

    match cli.command {
        Commands::Status { count } => {
            for _ in 0..count.max(1) {
                match client.status().await {
                    Ok(snapshot) => print_json(&snapshot)?,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
        }
        Commands::Enqueue { name } => {
            let job = JobRequest::new(name);
            match EnqueueOutcome::from(client.enqueue(&job.name).await) {
                outcome @ EnqueueOutcome::Enqueued { .. } => {
                    println!("{}", outcome.to_notification());
                }
                outcome @ EnqueueOutcome::Failed { .. } => {
                    eprintln!("{}", outcome.to_notification());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Health => {
            let timeout = config
                .target
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_PROBE_TIMEOUT);
            let report = health::probe(&client, timeout).await;
            println!("{}", report);
            if !report.is_healthy() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
