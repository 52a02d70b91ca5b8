//! Command implementations.

use std::io::Write;
use std::path::Path;

use ramp_support::{AssetMapQuery, DirectionKey, PaymentKey, ProviderSupportStore};
use ramp_support_revolut::provider::PROVIDER_ID;
use ramp_support_revolut::{
    EvmTokenIds, IngestReport, RevolutClient, RevolutConfig, process_revolut_config,
};

use crate::cli::{Cli, Command};
use crate::config::RampConfig;
use crate::error::CliError;

/// Runs a parsed command, writing results to `out`.
///
/// # Errors
///
/// Returns [`CliError`] if a file cannot be read or written, a tree fails
/// validation, or the Revolut API cannot be reached.
pub async fn run<W: Write + Send>(cli: Cli, config: &RampConfig, out: &mut W) -> Result<(), CliError> {
    match cli.command {
        Command::Ingest { config: input, out: path } => {
            let content = read_file(&input)?;
            let revolut: RevolutConfig = serde_json::from_str(&content)?;
            let store = build_store(&revolut);
            save_tree(&store, &path)?;
            writeln!(out, "wrote {}", path.display()).map_err(CliError::Output)
        }
        Command::Sync { out: path, api_key } => {
            let settings = &config.revolut;
            let api_key = api_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .or_else(|| settings.api_key())
                .ok_or(CliError::MissingApiKey)?;
            let client = RevolutClient::try_from_str(&settings.base_url, api_key)?
                .with_timeout(settings.timeout())
                .with_config_cache_ttl(settings.cache_ttl());
            let revolut = client.config().await?;
            let store = build_store(&revolut);
            let path = path.unwrap_or_else(|| settings.tree_cache.clone());
            save_tree(&store, &path)?;
            writeln!(out, "wrote {}", path.display()).map_err(CliError::Output)
        }
        Command::Check {
            tree,
            direction,
            region,
            fiat,
            payment,
            crypto,
        } => {
            let store = load_tree(&tree, PROVIDER_ID)?;
            let supported = check_path(
                &store,
                direction,
                region.as_deref(),
                fiat.as_deref(),
                payment,
                crypto.as_deref(),
            );
            let verdict = if supported { "supported" } else { "unsupported" };
            writeln!(out, "{verdict}").map_err(CliError::Output)
        }
        Command::Assets {
            tree,
            direction,
            region,
            payment,
            provider,
        } => {
            let store = load_tree(&tree, provider)?;
            let query = AssetMapQuery::new(direction, region, payment);
            let assets = store.fiat_provider_asset_map(&query);
            let json = serde_json::to_string_pretty(&assets)?;
            writeln!(out, "{json}").map_err(CliError::Output)
        }
    }
}

/// Builds the Revolut support store for a partner configuration.
///
/// The store supports the buy direction only.
#[must_use]
pub fn build_store(config: &RevolutConfig) -> ProviderSupportStore {
    let mut store = ProviderSupportStore::new(PROVIDER_ID);
    store.add().direction(DirectionKey::Buy);
    let report = process_revolut_config(config, &EvmTokenIds, &mut store);
    log_report(&report);
    store
}

fn log_report(report: &IngestReport) {
    tracing::info!(
        countries = report.countries,
        fiats = report.fiats,
        cryptos = report.cryptos.len(),
        skipped = report.skipped_cryptos.len(),
        "Built support tree"
    );
    for (id, reason) in &report.skipped_cryptos {
        tracing::debug!(%id, ?reason, "Skipped crypto");
    }
}

/// Returns whether `store` supports the given key path.
///
/// Omitted trailing levels check the shorter prefix.
#[must_use]
pub fn check_path(
    store: &ProviderSupportStore,
    direction: DirectionKey,
    region: Option<&str>,
    fiat: Option<&str>,
    payment: Option<PaymentKey>,
    crypto: Option<&str>,
) -> bool {
    let query = store.is().direction(direction);
    let Some(region) = region else {
        return query.supported();
    };
    let query = query.region(region);
    let Some(fiat) = fiat else {
        return query.supported();
    };
    let query = query.fiat(fiat);
    let Some(payment) = payment else {
        return query.supported();
    };
    let query = query.payment(payment);
    match crypto {
        Some(crypto) => query.crypto(crypto).supported(),
        None => query.supported(),
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

fn load_tree(path: &Path, provider_id: impl Into<String>) -> Result<ProviderSupportStore, CliError> {
    let content = read_file(path)?;
    let mut store = ProviderSupportStore::new(provider_id);
    store.from_json(&content)?;
    Ok(store)
}

fn save_tree(store: &ProviderSupportStore, path: &Path) -> Result<(), CliError> {
    let json = store.to_json()?;
    std::fs::write(path, json).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ramp_support::{PaymentMethod, Qualifier};
    use std::path::PathBuf;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RECORDED: &str = include_str!("../../ramp-support-revolut/testdata/config.json");

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ramp-support-{}-{name}", std::process::id()))
    }

    async fn run_args(args: &[&str], config: &RampConfig) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("ramp-support").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        run(cli, config, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_build_store() {
        let config: RevolutConfig = serde_json::from_str(RECORDED).unwrap();
        let store = build_store(&config);
        assert_eq!(store.provider_id(), PROVIDER_ID);

        let gb = |payment: PaymentMethod, crypto: &str| {
            check_path(
                &store,
                DirectionKey::Buy,
                Some("GB"),
                Some("iso:GBP"),
                Some(payment.into()),
                Some(crypto),
            )
        };
        assert!(gb(PaymentMethod::Revolut, "bitcoin:null"));
        assert!(!gb(PaymentMethod::Credit, "bitcoin:null"));
        assert!(!gb(PaymentMethod::Revolut, "monero:null"));
        assert!(!check_path(&store, DirectionKey::Sell, None, None, None, None));
    }

    #[test]
    fn test_check_path_prefixes() {
        let mut store = ProviderSupportStore::new("test");
        store
            .add()
            .direction(DirectionKey::Buy)
            .region("US")
            .fiat("iso:USD")
            .payment(Qualifier::All);

        assert!(check_path(&store, DirectionKey::Buy, None, None, None, None));
        assert!(check_path(&store, DirectionKey::Buy, Some("US"), None, None, None));
        assert!(!check_path(&store, DirectionKey::Buy, Some("UK"), None, None, None));
        let ach = |store: &ProviderSupportStore| {
            check_path(
                store,
                DirectionKey::Buy,
                Some("US"),
                Some("iso:USD"),
                Some(PaymentMethod::Ach.into()),
                None,
            )
        };
        // A lone match-all payment is not selected by a concrete method.
        assert!(!ach(&store));

        store
            .add()
            .direction(DirectionKey::Buy)
            .region("US")
            .fiat("iso:USD")
            .payment(PaymentMethod::Ach);
        assert!(ach(&store));
        // Neither payment branch has crypto children.
        assert!(!check_path(
            &store,
            DirectionKey::Buy,
            Some("US"),
            Some("iso:USD"),
            Some(PaymentMethod::Ach.into()),
            Some("bitcoin:null")
        ));
    }

    #[tokio::test]
    async fn test_ingest_check_and_assets() {
        let input = temp_path("ingest-config.json");
        let tree = temp_path("ingest-tree.json");
        std::fs::write(&input, RECORDED).unwrap();
        let (input_arg, tree_arg) = (input.to_str().unwrap(), tree.to_str().unwrap());
        let config = RampConfig::default();

        let output = run_args(&["ingest", "--config", input_arg, "--out", tree_arg], &config)
            .await
            .unwrap();
        assert!(output.starts_with("wrote "));

        let output = run_args(
            &["check", "--tree", tree_arg, "buy", "FR", "iso:EUR", "revolut", "ethereum:null"],
            &config,
        )
        .await
        .unwrap();
        assert_eq!(output, "supported\n");

        let output = run_args(&["check", "--tree", tree_arg, "sell"], &config)
            .await
            .unwrap();
        assert_eq!(output, "unsupported\n");

        let output = run_args(
            &[
                "assets",
                "--tree",
                tree_arg,
                "--direction",
                "buy",
                "--region",
                "GB",
                "--payment",
                "revolut",
            ],
            &config,
        )
        .await
        .unwrap();
        let assets: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(assets["providerId"], "revolut");
        assert_eq!(assets["fiat"]["iso:GBP"], true);
        assert_eq!(assets["crypto"]["bitcoin"][0]["tokenId"], serde_json::Value::Null);

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&tree).unwrap();
    }

    #[tokio::test]
    async fn test_missing_tree_reports_path() {
        let missing = temp_path("missing-tree.json");
        let err = run_args(
            &["check", "--tree", missing.to_str().unwrap(), "buy"],
            &RampConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Io { ref path, .. } if *path == missing));
    }

    #[tokio::test]
    async fn test_sync_fetches_live_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/partners/api/2.0/config"))
            .and(header("x-api-key", "from-config"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RECORDED))
            .expect(1)
            .mount(&server)
            .await;

        let tree = temp_path("sync-tree.json");
        let mut config = RampConfig::default();
        config.revolut.base_url = server.uri();
        config.revolut.api_key = Some("from-config".to_owned());
        config.revolut.tree_cache = tree.clone();

        let cli = Cli {
            command: Command::Sync {
                out: None,
                api_key: None,
            },
        };
        let mut out = Vec::new();
        run(cli, &config, &mut out).await.unwrap();

        let store = load_tree(&tree, PROVIDER_ID).unwrap();
        assert!(check_path(
            &store,
            DirectionKey::Buy,
            Some("DE"),
            Some("iso:EUR"),
            Some(PaymentMethod::Revolut.into()),
            Some("bitcoin:null")
        ));
        std::fs::remove_file(&tree).unwrap();
    }

    #[tokio::test]
    async fn test_sync_without_api_key() {
        let cli = Cli {
            command: Command::Sync {
                out: None,
                api_key: None,
            },
        };
        let mut out = Vec::new();
        let err = run(cli, &RampConfig::default(), &mut out).await.unwrap_err();
        assert!(matches!(err, CliError::MissingApiKey));
    }
}
