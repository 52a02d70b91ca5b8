//! Population of a support store from a Revolut partner configuration.
//!
//! Revolut publishes flat lists rather than combinations, so every entry is
//! added under match-all keys at the other levels:
//!
//! | Config entry     | Inserted path                               |
//! |------------------|---------------------------------------------|
//! | country `CC`     | `* / CC / * / *`                            |
//! | fiat `CUR`       | `* / * / iso:CUR / *`                       |
//! | crypto           | `* / * / * / * / <plugin>:<token or null>`  |
//! | payment method   | `* / * / * / revolut`                       |
//!
//! Entries that cannot be mapped are logged and skipped.

use ramp_support::{CryptoAssetKey, PaymentMethod, ProviderSupportStore, Qualifier};

use crate::resolver::TokenIdResolver;
use crate::types::{RevolutConfig, RevolutCrypto, RevolutFiat};

const ALL: Qualifier = Qualifier::All;

/// Revolut chain names with a matching plugin, whose id is the lowercased name.
pub const SUPPORTED_BLOCKCHAINS: [&str; 16] = [
    "ALGORAND",
    "AVALANCHE",
    "BITCOIN",
    "BITCOINCASH",
    "CARDANO",
    "DOGECOIN",
    "ETHEREUM",
    "LITECOIN",
    "OPTIMISM",
    "POLKADOT",
    "POLYGON",
    "RIPPLE",
    "SOLANA",
    "STELLAR",
    "TEZOS",
    "TRON",
];

/// Tickers accepted as a chain's native asset when no contract is given.
pub const NATIVE_CURRENCIES: [&str; 14] = [
    "ADA", "ALGO", "AVAX", "BCH", "BTC", "DOGE", "DOT", "ETH", "LTC", "POL", "SOL", "XLM", "XRP",
    "XTZ",
];

/// Payment options Revolut offers that are deliberately left out.
pub const IGNORED_PAYMENT_METHODS: [&str; 3] = ["card", "apple-pay", "google-pay"];

/// Why a crypto entry was not ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The chain has no matching plugin.
    UnknownBlockchain,
    /// The resolver does not know the contract.
    UnknownToken,
    /// No contract was given and the ticker is not a known native asset.
    UnknownCurrency,
}

/// What a call to [`process_revolut_config`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Countries added.
    pub countries: usize,
    /// Fiat currencies added.
    pub fiats: usize,
    /// Crypto keys added, in config order.
    pub cryptos: Vec<CryptoAssetKey>,
    /// Revolut crypto ids that were skipped.
    pub skipped_cryptos: Vec<(String, SkipReason)>,
    /// Payment methods added.
    pub payment_methods: Vec<PaymentMethod>,
    /// Payment methods neither added nor deliberately ignored.
    pub unknown_payment_methods: Vec<String>,
}

/// Adds everything `config` supports to `store`.
///
/// Insertion is idempotent, so processing a refreshed configuration into the
/// same store only adds what is new.
pub fn process_revolut_config<R>(
    config: &RevolutConfig,
    resolver: &R,
    store: &mut ProviderSupportStore,
) -> IngestReport
where
    R: TokenIdResolver + ?Sized,
{
    let mut report = IngestReport::default();

    for country in &config.countries {
        store.add().direction(ALL).region(country).fiat("*").payment(ALL);
        report.countries += 1;
    }
    for fiat in &config.fiat {
        add_fiat(store, fiat);
        report.fiats += 1;
    }
    for crypto in &config.crypto {
        match crypto_asset_key(resolver, crypto) {
            Ok(asset) => {
                let key = asset.to_string();
                store
                    .add()
                    .direction(ALL)
                    .region("*")
                    .fiat("*")
                    .payment(ALL)
                    .crypto(&key);
                store.add_crypto_info(key, crypto.info());
                report.cryptos.push(asset);
            }
            Err(reason) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(
                    id = %crypto.id,
                    currency = %crypto.currency,
                    blockchain = %crypto.blockchain,
                    ?reason,
                    "Skipping Revolut crypto"
                );
                report.skipped_cryptos.push((crypto.id.clone(), reason));
            }
        }
    }
    for method in &config.payment_methods {
        if method == PaymentMethod::Revolut.as_str() {
            store
                .add()
                .direction(ALL)
                .region("*")
                .fiat("*")
                .payment(PaymentMethod::Revolut);
            report.payment_methods.push(PaymentMethod::Revolut);
        } else if !IGNORED_PAYMENT_METHODS.contains(&method.as_str()) {
            #[cfg(feature = "telemetry")]
            tracing::warn!(method = %method, "Unknown payment method from Revolut");
            report.unknown_payment_methods.push(method.clone());
        }
    }

    report
}

fn add_fiat(store: &mut ProviderSupportStore, fiat: &RevolutFiat) {
    let key = fiat.fiat_key();
    store.add().direction(ALL).region("*").fiat(&key).payment(ALL);
    store.add_fiat_info(key, fiat.info());
}

/// Maps a Revolut crypto entry to its crypto key.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the entry has no local counterpart.
pub fn crypto_asset_key<R>(resolver: &R, crypto: &RevolutCrypto) -> Result<CryptoAssetKey, SkipReason>
where
    R: TokenIdResolver + ?Sized,
{
    if !SUPPORTED_BLOCKCHAINS.contains(&crypto.blockchain.as_str()) {
        return Err(SkipReason::UnknownBlockchain);
    }
    let plugin_id = crypto.blockchain.to_ascii_lowercase();

    match &crypto.smart_contract_address {
        Some(address) => resolver
            .token_id(&plugin_id, address)
            .map(|token_id| CryptoAssetKey::token(plugin_id, token_id))
            .ok_or(SkipReason::UnknownToken),
        None if NATIVE_CURRENCIES.contains(&crypto.currency.as_str()) => {
            Ok(CryptoAssetKey::native(plugin_id))
        }
        None => Err(SkipReason::UnknownCurrency),
    }
}
