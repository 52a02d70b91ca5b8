//! Projection of a support tree into the assets a provider offers.
//!
//! Given a direction, region and payment method, the projector sweeps the fiat
//! and crypto levels and reports every fiat currency and crypto asset reachable
//! under them. Fiat and crypto support are collected by two independent walks:
//! crypto results are the union over all payment-matching branches and are not
//! scoped to a particular fiat key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::{CryptoAssetKey, DirectionKey, MATCH_ALL, PaymentKey, is_qualifier};
use crate::tree::{SupportNode, query_nodes};

/// Selects the slice of a support tree to project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMapQuery {
    /// Transaction direction.
    pub direction: DirectionKey,
    /// Region key (e.g. `"US:CA"`).
    pub region: String,
    /// Payment method.
    pub payment: PaymentKey,
}

impl AssetMapQuery {
    /// Creates a new asset map query.
    pub fn new(
        direction: impl Into<DirectionKey>,
        region: impl Into<String>,
        payment: impl Into<PaymentKey>,
    ) -> Self {
        Self {
            direction: direction.into(),
            region: region.into(),
            payment: payment.into(),
        }
    }
}

/// A supported token on some chain; `None` is the chain's native asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRef {
    /// Token id, or `None` for the native asset.
    pub token_id: Option<String>,
}

/// The fiat currencies and crypto assets a provider supports for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiatProviderAssetMap {
    /// The provider this map was projected from.
    pub provider_id: String,
    /// Supported fiat keys, each mapped to `true`.
    pub fiat: BTreeMap<String, bool>,
    /// Supported tokens grouped by chain plugin id, in discovery order.
    pub crypto: BTreeMap<String, Vec<TokenRef>>,
}

impl FiatProviderAssetMap {
    /// Creates an empty map for a provider.
    #[must_use]
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            fiat: BTreeMap::new(),
            crypto: BTreeMap::new(),
        }
    }

    /// Returns `true` if neither fiat nor crypto support was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fiat.is_empty() && self.crypto.is_empty()
    }

    /// Returns `true` if the fiat key is supported.
    #[must_use]
    pub fn supports_fiat(&self, fiat: &str) -> bool {
        self.fiat.get(fiat).copied().unwrap_or(false)
    }

    /// Returns `true` if the token is listed under its chain.
    #[must_use]
    pub fn supports_crypto(&self, asset: &CryptoAssetKey) -> bool {
        self.crypto.get(&asset.plugin_id).is_some_and(|tokens| {
            tokens
                .iter()
                .any(|token| token.token_id == asset.token_id)
        })
    }

    fn insert_token(&mut self, asset: CryptoAssetKey) {
        let tokens = self.crypto.entry(asset.plugin_id).or_default();
        let token = TokenRef {
            token_id: asset.token_id,
        };
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
}

/// Projects `tree` into an asset map for `query`.
#[must_use]
pub fn project_asset_map(
    provider_id: &str,
    tree: &SupportNode,
    query: &AssetMapQuery,
) -> FiatProviderAssetMap {
    let mut asset_map = FiatProviderAssetMap::new(provider_id);
    let payment = query.payment.as_str();

    let region_nodes = query_nodes(&[tree], query.direction.as_str());
    if region_nodes.is_empty() {
        return asset_map;
    }
    let fiat_nodes = query_nodes(&region_nodes, &query.region);
    if fiat_nodes.is_empty() {
        return asset_map;
    }

    for fiat_node in &fiat_nodes {
        for (fiat_key, payment_node) in fiat_node.children() {
            if query_nodes(&[payment_node], payment).is_empty() {
                continue;
            }
            if fiat_key == MATCH_ALL {
                for other in fiat_node.keys().filter(|key| !is_qualifier(key)) {
                    asset_map.fiat.insert(other.to_owned(), true);
                }
            } else {
                asset_map.fiat.insert(fiat_key.to_owned(), true);
            }
        }
    }

    let payment_nodes = query_nodes(&fiat_nodes, MATCH_ALL);
    let crypto_nodes = query_nodes(&payment_nodes, payment);
    for crypto_node in crypto_nodes {
        for crypto_key in crypto_node.keys().filter(|key| *key != MATCH_ALL) {
            asset_map.insert_token(CryptoAssetKey::parse(crypto_key));
        }
    }

    asset_map
}
