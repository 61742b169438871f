use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use synapse_console::commands::{self, Command};
use synapse_console::config;
use synapse_console::ConsoleClient;

#[derive(Parser, Debug)]
#[command(name = "synapse")]
#[command(version, about = "Command-line client for the Synapse management console", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (YAML/JSON/TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the configuration
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // stdout carries the command output
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => config::load_from_env_or_file().context("Failed to load configuration")?,
    };
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
        config::validate(&config)?;
    }
    debug!("Using backend {}", config.api.base_url);

    let client = ConsoleClient::from_config(&config)?;
    client.on_unauthorized(|event: &synapse_console::transport::UnauthorizedEvent| {
        warn!(
            "Session expired during {} {}; run `synapse login` again",
            event.method, event.path
        );
    });

    commands::run(args.command, &config, &client).await?;
    Ok(())
}
