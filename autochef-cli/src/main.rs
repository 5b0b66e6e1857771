//! AutoChef CLI
//!
//! Brute-force recipe discovery against a CyberChef-style transformation
//! service: auto-detect a decoding prefix, then try every catalog operation
//! as the final step and report the ones that yield readable output.

mod commands;
mod config;
mod input;
mod output;
mod service;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "autochef")]
#[command(about = "Recipe discovery for CyberChef-style services", long_about = None)]
struct Cli {
    /// Transformation service URL
    #[arg(
        long,
        global = true,
        env = "AUTOCHEF_SERVER_URL",
        default_value = "http://localhost:3000"
    )]
    server_url: String,

    /// API key for hosted services, sent as x-api-key
    #[arg(long, global = true, env = "AUTOCHEF_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config {
        server_url: cli.server_url,
        api_key: cli.api_key,
        timeout: cli.timeout.map(Duration::from_secs),
    };
    config.validate()?;

    tracing::debug!("Using transformation service at {}", config.server_url);

    handle_command(cli.command, &config).await
}

/// Logs go to stderr so stdout only carries results
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "autochef=warn,autochef_client=warn",
        1 => "autochef=info,autochef_client=info",
        _ => "autochef=debug,autochef_client=debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
