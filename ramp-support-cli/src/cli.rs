//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ramp_support::{DirectionKey, PaymentKey};

/// Fiat ramp provider support tool.
#[derive(Debug, Parser)]
#[command(name = "ramp-support", version, about = "Build and query fiat provider support trees")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a support tree from a recorded Revolut configuration.
    Ingest {
        /// Revolut partner configuration JSON.
        #[arg(long)]
        config: PathBuf,

        /// Where to write the support tree.
        #[arg(long)]
        out: PathBuf,
    },

    /// Fetch the live Revolut configuration and write its support tree.
    Sync {
        /// Where to write the support tree (default: `revolut.tree_cache`).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Partner API key, overriding `revolut.api_key`.
        #[arg(long, env = "REVOLUT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Check whether a tree supports a path of keys.
    ///
    /// Trailing levels may be omitted to check a shorter prefix.
    Check {
        /// Support tree JSON.
        #[arg(long)]
        tree: PathBuf,

        /// Direction key (`buy`, `sell`, `*` or `""`).
        direction: DirectionKey,

        /// Region key (e.g. `US:CA`).
        region: Option<String>,

        /// Fiat key (e.g. `iso:USD`).
        fiat: Option<String>,

        /// Payment method key.
        payment: Option<PaymentKey>,

        /// Crypto key (e.g. `ethereum:null`).
        crypto: Option<String>,
    },

    /// Print the assets a tree supports for a direction, region and payment.
    Assets {
        /// Support tree JSON.
        #[arg(long)]
        tree: PathBuf,

        /// Direction key.
        #[arg(long)]
        direction: DirectionKey,

        /// Region key.
        #[arg(long)]
        region: String,

        /// Payment method key.
        #[arg(long)]
        payment: PaymentKey,

        /// Provider id for the output.
        #[arg(long, default_value = "revolut")]
        provider: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ramp_support::PaymentMethod;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "ramp-support",
            "check",
            "--tree",
            "tree.json",
            "buy",
            "US:CA",
            "iso:USD",
            "ach",
        ])
        .unwrap();
        match cli.command {
            Command::Check {
                tree,
                direction,
                region,
                fiat,
                payment,
                crypto,
            } => {
                assert_eq!(tree, PathBuf::from("tree.json"));
                assert_eq!(direction, DirectionKey::Buy);
                assert_eq!(region.as_deref(), Some("US:CA"));
                assert_eq!(fiat.as_deref(), Some("iso:USD"));
                assert_eq!(payment, Some(PaymentKey::Method(PaymentMethod::Ach)));
                assert_eq!(crypto, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(Cli::try_parse_from(["ramp-support", "check", "--tree", "t", "lend"]).is_err());
        assert!(
            Cli::try_parse_from([
                "ramp-support",
                "assets",
                "--tree",
                "t",
                "--direction",
                "buy",
                "--region",
                "US",
                "--payment",
                "cash",
            ])
            .is_err()
        );
    }
}
