#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Revolut Ramp support for the `ramp-support` matching engine.
//!
//! Revolut's partner API publishes the countries, fiat currencies, crypto
//! assets and payment options it accepts as independent lists. This crate
//! turns that configuration into a [`ProviderSupportStore`](ramp_support::ProviderSupportStore)
//! and, with the `client` feature, keeps one in sync with the live API.
//!
//! # Modules
//!
//! - [`ingest`] - Populating a support store from a partner configuration
//! - [`refresh`] - Time-based refresh gating
//! - [`region`] - Customer region codes
//! - [`resolver`] - Contract address to token id resolution
//! - [`types`] - Partner API wire types
//! - `client` - HTTP client with a TTL-cached configuration fetch
//! - `provider` - A provider that refreshes and answers asset queries
//!
//! # Feature Flags
//!
//! - `client` - Enables the HTTP client and live provider
//! - `telemetry` - Logs skipped entries and HTTP requests via `tracing`

#[cfg(feature = "client")]
pub mod client;
pub mod ingest;
#[cfg(feature = "client")]
pub mod provider;
pub mod refresh;
pub mod region;
pub mod resolver;
pub mod types;

#[cfg(feature = "client")]
pub use client::{RevolutClient, RevolutClientError};
pub use ingest::{IngestReport, SkipReason, process_revolut_config};
#[cfg(feature = "client")]
pub use provider::RevolutProvider;
pub use refresh::CheckDue;
pub use region::RegionCode;
pub use resolver::{EvmTokenIds, TokenIdResolver};
pub use types::{RevolutConfig, RevolutCrypto, RevolutFiat};
