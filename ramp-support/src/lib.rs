#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Support matching for fiat on/off-ramp providers.
//!
//! A provider's supported combinations of transaction direction, region, fiat
//! currency, payment method and crypto asset are kept in a five-level tree.
//! Keys at every level may be the match-all qualifier `"*"` or the match-any
//! qualifier `""`, and composite keys such as `"US:CA"` match by group and
//! sub-part, so a handful of rules can describe a large support matrix.
//!
//! # Overview
//!
//! Ingestion code fills a [`ProviderSupportStore`] through the fluent
//! [`add`](ProviderSupportStore::add) chain and attaches provider metadata to
//! fiat and crypto keys. Readers ask yes/no questions through the
//! [`is`](ProviderSupportStore::is) chain, or project everything reachable for
//! a direction, region and payment method into a [`FiatProviderAssetMap`].
//! Trees persist as nested JSON objects.
//!
//! ```rust
//! use ramp_support::{AssetMapQuery, DirectionKey, PaymentMethod, ProviderSupportStore, Qualifier};
//!
//! let mut store = ProviderSupportStore::new("bity");
//! store.add().direction(Qualifier::All).region("FR");
//! store
//!     .add()
//!     .direction(DirectionKey::Sell)
//!     .region("*")
//!     .fiat("iso:EUR")
//!     .payment(PaymentMethod::Sepa)
//!     .crypto("bitcoin:null");
//!
//! assert!(
//!     store
//!         .is()
//!         .direction(DirectionKey::Sell)
//!         .region("FR")
//!         .fiat("iso:EUR")
//!         .supported()
//! );
//!
//! let assets = store.fiat_provider_asset_map(&AssetMapQuery::new(
//!     DirectionKey::Sell,
//!     "FR",
//!     PaymentMethod::Sepa,
//! ));
//! assert!(assets.supports_fiat("iso:EUR"));
//! ```
//!
//! # Modules
//!
//! - [`add`] - Fluent insertion chain
//! - [`asset_map`] - Projection of a tree into supported fiat and crypto assets
//! - [`error`] - Parse and validation errors
//! - [`json`] - Nested-object serialization and validation
//! - [`key`] - Level keys, qualifiers and the key-matching predicate
//! - [`payment`] - The closed set of payment methods
//! - [`query`] - Fluent query chain
//! - [`store`] - The provider support store
//! - [`tree`] - Tree nodes and the node-query primitive
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` events when trees are restored and asset
//!   maps are projected

pub mod add;
pub mod asset_map;
pub mod error;
pub mod json;
pub mod key;
pub mod payment;
pub mod query;
pub mod store;
pub mod tree;

pub use asset_map::{AssetMapQuery, FiatProviderAssetMap, TokenRef};
pub use error::{KeyParseError, SupportTreeError};
pub use json::ProviderSupportObject;
pub use key::{
    CryptoAssetKey, DirectionKey, Level, MATCH_ALL, MATCH_ANY, PaymentKey, Qualifier,
    key_matches_query,
};
pub use payment::PaymentMethod;
pub use store::ProviderSupportStore;
pub use tree::{SupportNode, query_nodes};
