//! Command-line tool for fiat ramp provider support trees.
//!
//! # Modules
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - Command implementations
//! - [`config`] - TOML configuration with environment variable expansion
//! - [`error`] - Error types

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
