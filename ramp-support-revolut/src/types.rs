//! Wire types of the Revolut Ramp partner API.
//!
//! These mirror the `GET /partners/api/2.0/config` response. Field names follow
//! the API, which mixes `snake_case` and `camelCase`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The partner configuration: where, with what and how customers can buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevolutConfig {
    /// Configuration schema version.
    pub version: String,
    /// ISO 3166 alpha-2 codes of supported countries.
    pub countries: Vec<String>,
    /// Supported fiat currencies with their order limits.
    pub fiat: Vec<RevolutFiat>,
    /// Supported crypto assets.
    pub crypto: Vec<RevolutCrypto>,
    /// Supported payment options (e.g. `revolut`, `card`).
    pub payment_methods: Vec<String>,
}

/// A fiat currency offered by Revolut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevolutFiat {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Minimum order amount.
    pub min_limit: f64,
    /// Maximum order amount.
    pub max_limit: f64,
}

impl RevolutFiat {
    /// Returns the support-tree fiat key, `iso:<currency>`.
    #[must_use]
    pub fn fiat_key(&self) -> String {
        format!("iso:{}", self.currency)
    }

    /// Returns the value stored as auxiliary fiat info.
    #[must_use]
    pub fn info(&self) -> Value {
        json!({
            "currency": self.currency,
            "min_limit": self.min_limit,
            "max_limit": self.max_limit,
        })
    }
}

/// A crypto asset offered by Revolut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevolutCrypto {
    /// Revolut's asset id (e.g. `USDC-ETH`), used when requesting quotes.
    pub id: String,
    /// Ticker symbol.
    pub currency: String,
    /// Revolut's chain name (e.g. `ETHEREUM`).
    pub blockchain: String,
    /// Token contract address, absent for native assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_contract_address: Option<String>,
}

impl RevolutCrypto {
    /// Returns the value stored as auxiliary crypto info.
    #[must_use]
    pub fn info(&self) -> Value {
        let mut info = json!({
            "id": self.id,
            "currency": self.currency,
            "blockchain": self.blockchain,
        });
        if let (Some(address), Value::Object(map)) = (&self.smart_contract_address, &mut info) {
            map.insert("smartContractAddress".to_owned(), json!(address));
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_config_deserializes() {
        let config: RevolutConfig =
            serde_json::from_str(include_str!("../testdata/config.json")).unwrap();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.countries.len(), 48);
        assert_eq!(config.fiat.len(), 18);
        assert_eq!(config.crypto.len(), 39);
        assert_eq!(
            config.payment_methods,
            ["card", "revolut", "apple-pay", "google-pay"]
        );

        let usdc = &config.crypto[2];
        assert_eq!(usdc.id, "USDC-ETH");
        assert_eq!(
            usdc.smart_contract_address.as_deref(),
            Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")
        );
        assert!(config.crypto[0].smart_contract_address.is_none());
    }

    #[test]
    fn test_info_values() {
        let fiat = RevolutFiat {
            currency: "GBP".to_owned(),
            min_limit: 5.0,
            max_limit: 10000.0,
        };
        assert_eq!(fiat.fiat_key(), "iso:GBP");
        assert_eq!(
            fiat.info(),
            json!({ "currency": "GBP", "min_limit": 5.0, "max_limit": 10000.0 })
        );

        let crypto: RevolutCrypto = serde_json::from_value(json!({
            "id": "USDT-TRON",
            "currency": "USDT",
            "blockchain": "TRON",
            "smartContractAddress": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"
        }))
        .unwrap();
        assert_eq!(crypto.info()["smartContractAddress"], "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t");
        assert_eq!(serde_json::to_value(&crypto).unwrap(), crypto.info());
    }
}
