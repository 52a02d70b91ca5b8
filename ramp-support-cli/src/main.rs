//! Fiat ramp provider support tool.
//!
//! # Usage
//!
//! ```bash
//! # Build a tree from a recorded partner configuration
//! ramp-support ingest --config revolut-config.json --out revolut-support.json
//!
//! # Fetch the live configuration (key from REVOLUT_API_KEY or ramp.toml)
//! ramp-support sync
//!
//! # Query a tree
//! ramp-support check --tree revolut-support.json buy GB iso:GBP revolut bitcoin:null
//! ramp-support assets --tree revolut-support.json --direction buy --region GB --payment revolut
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to TOML configuration file (default: `ramp.toml`)
//! - `REVOLUT_API_KEY` - Partner API key for `sync`
//! - `RUST_LOG` - Log level filter (default: `info`)

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ramp_support_cli::cli::Cli;
use ramp_support_cli::commands;
use ramp_support_cli::config::RampConfig;
use ramp_support_cli::error::CliError;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("ramp-support failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = RampConfig::load()?;
    let mut out = std::io::stdout();
    commands::run(cli, &config, &mut out).await
}
