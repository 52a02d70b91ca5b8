//! A live Revolut support provider.
//!
//! [`RevolutProvider`] keeps a support store in sync with the partner API and
//! answers asset queries from it. The configuration is re-ingested at most once
//! per refresh interval.

use std::time::Duration;

use ramp_support::{
    AssetMapQuery, DirectionKey, FiatProviderAssetMap, PaymentKey, ProviderSupportStore,
    SupportTreeError,
};
use tokio::sync::Mutex;

use crate::client::{RevolutClient, RevolutClientError};
use crate::ingest::{IngestReport, process_revolut_config};
use crate::refresh::CheckDue;
use crate::region::RegionCode;
use crate::resolver::TokenIdResolver;
use crate::types::{RevolutCrypto, RevolutFiat};

/// Provider id used for the store and in asset maps.
pub const PROVIDER_ID: &str = "revolut";

#[derive(Debug)]
struct ProviderState {
    store: ProviderSupportStore,
    check_due: CheckDue,
}

/// Answers Revolut support queries, refreshing from the partner API as needed.
#[derive(Debug)]
pub struct RevolutProvider<R> {
    client: RevolutClient,
    resolver: R,
    state: Mutex<ProviderState>,
}

impl<R> RevolutProvider<R>
where
    R: TokenIdResolver + Send + Sync,
{
    /// Creates a provider refreshing once per [`CheckDue::DEFAULT_INTERVAL`].
    ///
    /// The store starts out supporting the buy direction only.
    pub fn new(client: RevolutClient, resolver: R) -> Self {
        Self::with_refresh_interval(client, resolver, CheckDue::DEFAULT_INTERVAL)
    }

    /// Creates a provider with a custom refresh interval.
    pub fn with_refresh_interval(client: RevolutClient, resolver: R, interval: Duration) -> Self {
        let mut store = ProviderSupportStore::new(PROVIDER_ID);
        store.add().direction(DirectionKey::Buy);
        Self {
            client,
            resolver,
            state: Mutex::new(ProviderState {
                store,
                check_due: CheckDue::new(interval),
            }),
        }
    }

    /// Returns the fiat and crypto assets supported for a direction, region
    /// and payment method.
    ///
    /// # Errors
    ///
    /// Returns [`RevolutClientError`] if a due refresh fails. The next call
    /// retries the refresh.
    pub async fn supported_assets(
        &self,
        direction: DirectionKey,
        region: &RegionCode,
        payment: impl Into<PaymentKey>,
    ) -> Result<FiatProviderAssetMap, RevolutClientError> {
        let mut state = self.state.lock().await;
        self.refresh_if_due(&mut state).await?;
        let query = AssetMapQuery::new(direction, region.region_key(), payment);
        Ok(state.store.fiat_provider_asset_map(&query))
    }

    /// Fetches and ingests the partner configuration now.
    ///
    /// # Errors
    ///
    /// Returns [`RevolutClientError`] if the configuration cannot be fetched.
    pub async fn refresh(&self) -> Result<IngestReport, RevolutClientError> {
        let mut state = self.state.lock().await;
        self.ingest(&mut state).await
    }

    /// Returns the Revolut details of a fiat key.
    ///
    /// # Errors
    ///
    /// Returns [`SupportTreeError::Json`] if the stored info is malformed.
    pub async fn fiat_info(&self, fiat: &str) -> Result<Option<RevolutFiat>, SupportTreeError> {
        self.state.lock().await.store.fiat_info_as(fiat)
    }

    /// Returns the Revolut details of a crypto key.
    ///
    /// # Errors
    ///
    /// Returns [`SupportTreeError::Json`] if the stored info is malformed.
    pub async fn crypto_info(
        &self,
        crypto: &str,
    ) -> Result<Option<RevolutCrypto>, SupportTreeError> {
        self.state.lock().await.store.crypto_info_as(crypto)
    }

    /// Returns a copy of the current support store.
    pub async fn snapshot(&self) -> ProviderSupportStore {
        self.state.lock().await.store.clone()
    }

    async fn refresh_if_due(&self, state: &mut ProviderState) -> Result<(), RevolutClientError> {
        if state.check_due.check() {
            if let Err(err) = self.ingest(state).await {
                state.check_due.reset();
                return Err(err);
            }
        }
        Ok(())
    }

    async fn ingest(&self, state: &mut ProviderState) -> Result<IngestReport, RevolutClientError> {
        let config = self.client.config().await?;
        let report = process_revolut_config(&config, &self.resolver, &mut state.store);

        #[cfg(feature = "telemetry")]
        tracing::info!(
            countries = report.countries,
            fiats = report.fiats,
            cryptos = report.cryptos.len(),
            skipped = report.skipped_cryptos.len(),
            "Ingested Revolut config"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::EvmTokenIds;
    use ramp_support::{CryptoAssetKey, PaymentMethod};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recorded_config() -> serde_json::Value {
        serde_json::from_str(include_str!("../testdata/config.json")).unwrap()
    }

    fn provider(server: &MockServer) -> RevolutProvider<EvmTokenIds> {
        let client = RevolutClient::try_from_str(&server.uri(), "test-key")
            .unwrap()
            .without_config_cache();
        RevolutProvider::new(client, EvmTokenIds)
    }

    #[tokio::test]
    async fn test_supported_assets_for_region() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/partners/api/2.0/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recorded_config()))
            .expect(1)
            .mount(&server)
            .await;
        let provider = provider(&server);

        let gb = RegionCode::country("GB");
        let assets = provider
            .supported_assets(DirectionKey::Buy, &gb, PaymentMethod::Revolut)
            .await
            .unwrap();
        assert_eq!(assets.provider_id, PROVIDER_ID);
        assert!(assets.supports_fiat("iso:GBP"));
        assert!(assets.supports_crypto(&CryptoAssetKey::native("bitcoin")));
        // The EVM resolver also maps Polygon and Optimism tokens.
        assert!(assets.supports_crypto(&CryptoAssetKey::token(
            "polygon",
            "3c499c542cef5e3811e1192ce70d8cc03d5c3359"
        )));

        // The second call is within the refresh interval.
        let sell = provider
            .supported_assets(DirectionKey::Sell, &gb, PaymentMethod::Revolut)
            .await
            .unwrap();
        assert!(sell.is_empty());

        let card = provider
            .supported_assets(DirectionKey::Buy, &gb, PaymentMethod::Credit)
            .await
            .unwrap();
        assert!(card.is_empty());

        let us = provider
            .supported_assets(DirectionKey::Buy, &RegionCode::country("US"), PaymentMethod::Revolut)
            .await
            .unwrap();
        assert!(us.is_empty());
    }

    #[tokio::test]
    async fn test_typed_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/partners/api/2.0/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recorded_config()))
            .mount(&server)
            .await;
        let provider = provider(&server);
        provider.refresh().await.unwrap();

        let gbp = provider.fiat_info("iso:GBP").await.unwrap().unwrap();
        assert_eq!(gbp.currency, "GBP");
        assert!((gbp.max_limit - 10000.0).abs() < f64::EPSILON);

        let btc = provider.crypto_info("bitcoin:null").await.unwrap().unwrap();
        assert_eq!(btc.id, "BTC");
        assert!(provider.crypto_info("monero:null").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/partners/api/2.0/config"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/partners/api/2.0/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recorded_config()))
            .mount(&server)
            .await;
        let provider = provider(&server);
        let gb = RegionCode::country("GB");

        assert!(matches!(
            provider
                .supported_assets(DirectionKey::Buy, &gb, PaymentMethod::Revolut)
                .await,
            Err(RevolutClientError::HttpStatus { .. })
        ));
        let assets = provider
            .supported_assets(DirectionKey::Buy, &gb, PaymentMethod::Revolut)
            .await
            .unwrap();
        assert!(assets.supports_fiat("iso:EUR"));
    }
}
