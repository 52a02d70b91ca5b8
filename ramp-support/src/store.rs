//! The provider support store.
//!
//! [`ProviderSupportStore`] owns one provider's support tree together with two
//! flat metadata maps keyed by fiat and crypto key. Ingestion populates it
//! through [`ProviderSupportStore::add`]; readers use
//! [`ProviderSupportStore::is`] and
//! [`ProviderSupportStore::fiat_provider_asset_map`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::add::SupportAdd;
use crate::asset_map::{AssetMapQuery, FiatProviderAssetMap, project_asset_map};
use crate::error::SupportTreeError;
use crate::json::{ProviderSupportObject, tree_from_object, tree_to_object, validate_support_object};
use crate::query::SupportQuery;
use crate::tree::SupportNode;

/// A provider's support tree and auxiliary fiat/crypto metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSupportStore {
    provider_id: String,
    support_tree: SupportNode,
    fiat_info: HashMap<String, Value>,
    crypto_info: HashMap<String, Value>,
}

impl ProviderSupportStore {
    /// Creates an empty store for `provider_id`.
    ///
    /// The id is carried into projected asset maps and plays no part in
    /// matching.
    #[must_use]
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            ..Self::default()
        }
    }

    /// Returns the provider id.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Returns the underlying support tree.
    #[must_use]
    pub const fn tree(&self) -> &SupportNode {
        &self.support_tree
    }

    /// Starts an insertion chain at the tree root.
    pub const fn add(&mut self) -> SupportAdd<'_> {
        SupportAdd::new(&mut self.support_tree)
    }

    /// Starts a support query at the tree root.
    #[must_use]
    pub const fn is(&self) -> SupportQuery<'_> {
        SupportQuery::new(&self.support_tree)
    }

    /// Stores metadata for a fiat key, replacing any previous entry.
    pub fn add_fiat_info(&mut self, fiat: impl Into<String>, info: Value) {
        self.fiat_info.insert(fiat.into(), info);
    }

    /// Stores metadata for a crypto key, replacing any previous entry.
    pub fn add_crypto_info(&mut self, crypto: impl Into<String>, info: Value) {
        self.crypto_info.insert(crypto.into(), info);
    }

    /// Returns the metadata stored for a fiat key.
    #[must_use]
    pub fn fiat_info(&self, fiat: &str) -> Option<&Value> {
        self.fiat_info.get(fiat)
    }

    /// Returns the metadata stored for a crypto key.
    #[must_use]
    pub fn crypto_info(&self, crypto: &str) -> Option<&Value> {
        self.crypto_info.get(crypto)
    }

    /// Decodes the metadata stored for a fiat key into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SupportTreeError::Json`] if the stored value does not fit `T`.
    pub fn fiat_info_as<T: DeserializeOwned>(&self, fiat: &str) -> Result<Option<T>, SupportTreeError> {
        decode_info(self.fiat_info.get(fiat))
    }

    /// Decodes the metadata stored for a crypto key into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SupportTreeError::Json`] if the stored value does not fit `T`.
    pub fn crypto_info_as<T: DeserializeOwned>(
        &self,
        crypto: &str,
    ) -> Result<Option<T>, SupportTreeError> {
        decode_info(self.crypto_info.get(crypto))
    }

    /// Projects the fiat currencies and crypto assets supported for `query`.
    #[must_use]
    pub fn fiat_provider_asset_map(&self, query: &AssetMapQuery) -> FiatProviderAssetMap {
        let asset_map = project_asset_map(&self.provider_id, &self.support_tree, query);

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            provider = %self.provider_id,
            direction = %query.direction,
            region = %query.region,
            payment = %query.payment,
            fiats = asset_map.fiat.len(),
            chains = asset_map.crypto.len(),
            "ramp_support.store.asset_map"
        );

        asset_map
    }

    /// Returns the tree in its nested-object form.
    #[must_use]
    pub fn to_json_object(&self) -> ProviderSupportObject {
        tree_to_object(&self.support_tree)
    }

    /// Replaces the tree with the contents of `obj`.
    ///
    /// Keys are taken as given; use [`from_json`](Self::from_json) to validate.
    pub fn from_json_object(&mut self, obj: &ProviderSupportObject) {
        self.support_tree.clear();
        tree_from_object(&mut self.support_tree, obj);
    }

    /// Serializes the tree to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`SupportTreeError`] if the tree holds a direction or payment
    /// key outside the closed key sets.
    pub fn to_json(&self) -> Result<String, SupportTreeError> {
        let value = Value::Object(self.to_json_object());
        validate_support_object(&value)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Replaces the tree with one parsed from a JSON string.
    ///
    /// The input is parsed and validated in full before the current tree is
    /// touched, so on error the store is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SupportTreeError::Json`] for malformed JSON and a validation
    /// variant for a structurally invalid tree.
    pub fn from_json(&mut self, json: &str) -> Result<(), SupportTreeError> {
        let value: Value = serde_json::from_str(json)?;
        let obj = validate_support_object(&value)?;
        self.from_json_object(obj);

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            provider = %self.provider_id,
            nodes = self.support_tree.descendant_count(),
            "ramp_support.store.restored"
        );

        Ok(())
    }
}

fn decode_info<T: DeserializeOwned>(info: Option<&Value>) -> Result<Option<T>, SupportTreeError> {
    info.map(|value| serde_json::from_value(value.clone()).map_err(SupportTreeError::from))
        .transpose()
}
