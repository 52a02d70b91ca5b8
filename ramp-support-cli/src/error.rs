//! Error types for the command-line tool.

use std::path::PathBuf;

use ramp_support::SupportTreeError;
use ramp_support_revolut::RevolutClientError;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("output error: {0}")]
    Output(#[source] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON document could not be decoded or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A support tree failed validation.
    #[error("support tree error: {0}")]
    Tree(#[from] SupportTreeError),

    /// `sync` was run without an API key.
    #[error("no Revolut API key: pass --api-key, set REVOLUT_API_KEY or revolut.api_key")]
    MissingApiKey,

    /// Talking to the Revolut API failed.
    #[error("Revolut error: {0}")]
    Revolut(#[from] RevolutClientError),
}
