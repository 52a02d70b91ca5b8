//! HTTP client for the Revolut Ramp partner API.
//!
//! [`RevolutClient`] fetches `GET /partners/api/2.0/config`, authenticating
//! with the partner API key, and keeps the decoded [`RevolutConfig`] in a TTL
//! cache.
//!
//! ## Error Handling
//!
//! [`RevolutClientError`] captures
//! - URL construction
//! - Invalid API keys
//! - HTTP transport failures
//! - JSON deserialization errors
//! - Unexpected HTTP status responses

use std::fmt::Display;
use std::time::{Duration, Instant};

use http::header::{ACCEPT, HeaderName, InvalidHeaderValue};
use http::{HeaderMap, HeaderValue, StatusCode};
use reqwest::Client;
use tokio::sync::RwLock;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::types::RevolutConfig;

/// Header carrying the partner API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Production base URL of the partner API.
pub const DEFAULT_BASE_URL: &str = "https://ramp-partners.revolut.com";

#[derive(Clone, Debug)]
struct ConfigCacheState {
    config: RevolutConfig,
    expires_at: Instant,
}

/// A TTL cache for the partner configuration.
///
/// Each clone has an independent cache state.
#[derive(Debug)]
pub struct ConfigCache {
    ttl: Duration,
    state: RwLock<Option<ConfigCacheState>>,
}

impl ConfigCache {
    /// Creates a new cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(None),
        }
    }

    /// Returns the cached configuration if it has not expired.
    pub async fn get(&self) -> Option<RevolutConfig> {
        let guard = self.state.read().await;
        let cache = guard.as_ref()?;
        (Instant::now() < cache.expires_at).then(|| cache.config.clone())
    }

    /// Stores a configuration with the configured TTL.
    pub async fn set(&self, config: RevolutConfig) {
        let mut guard = self.state.write().await;
        *guard = Some(ConfigCacheState {
            config,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Clears the cache.
    pub async fn clear(&self) {
        let mut guard = self.state.write().await;
        *guard = None;
    }
}

impl Clone for ConfigCache {
    fn clone(&self) -> Self {
        Self::new(self.ttl)
    }
}

/// Errors that can occur while talking to the Revolut partner API.
#[derive(Debug, thiserror::Error)]
pub enum RevolutClientError {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// No API key was configured.
    #[error("No Revolut API key configured")]
    MissingApiKey,
    /// The API key cannot be sent as a header value.
    #[error("Invalid Revolut API key: {0}")]
    InvalidApiKey(#[source] InvalidHeaderValue),
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// JSON deserialization error.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Unexpected HTTP status code.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// Failed to read response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// A client for the Revolut Ramp partner API.
#[derive(Clone, Debug)]
pub struct RevolutClient {
    base_url: Url,
    config_url: Url,
    client: Client,
    headers: HeaderMap,
    timeout: Option<Duration>,
    config_cache: ConfigCache,
}

impl RevolutClient {
    /// Default TTL for the cached configuration (one hour).
    pub const DEFAULT_CONFIG_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

    /// Constructs a client for `base_url` authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`RevolutClientError`] if the key is empty or not a valid
    /// header value, or if the endpoint URL cannot be built.
    pub fn try_new(base_url: Url, api_key: &str) -> Result<Self, RevolutClientError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(RevolutClientError::MissingApiKey);
        }
        let mut api_key = HeaderValue::from_str(api_key).map_err(RevolutClientError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);

        let config_url = base_url
            .join("./partners/api/2.0/config")
            .map_err(|e| RevolutClientError::UrlParse {
                context: "Failed to construct ./partners/api/2.0/config URL",
                source: e,
            })?;

        Ok(Self {
            base_url,
            config_url,
            client: Client::new(),
            headers,
            timeout: None,
            config_cache: ConfigCache::new(Self::DEFAULT_CONFIG_CACHE_TTL),
        })
    }

    /// Constructs a client for the production API.
    ///
    /// # Errors
    ///
    /// See [`try_new`](Self::try_new).
    pub fn production(api_key: &str) -> Result<Self, RevolutClientError> {
        Self::try_from_str(DEFAULT_BASE_URL, api_key)
    }

    /// Parses `base_url` and calls [`try_new`](Self::try_new).
    ///
    /// # Errors
    ///
    /// See [`try_new`](Self::try_new).
    pub fn try_from_str(base_url: &str, api_key: &str) -> Result<Self, RevolutClientError> {
        // Normalize to a single trailing slash so joins stay under the base.
        let mut normalized = base_url.trim_end_matches('/').to_owned();
        normalized.push('/');
        let url = Url::parse(&normalized).map_err(|e| RevolutClientError::UrlParse {
            context: "Failed to parse base url",
            source: e,
        })?;
        Self::try_new(url, api_key)
    }

    /// Returns the base URL used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configuration endpoint URL.
    #[must_use]
    pub const fn config_url(&self) -> &Url {
        &self.config_url
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns a reference to the configuration cache.
    #[must_use]
    pub const fn config_cache(&self) -> &ConfigCache {
        &self.config_cache
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the TTL of the configuration cache.
    #[must_use]
    pub fn with_config_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config_cache = ConfigCache::new(ttl);
        self
    }

    /// Disables configuration caching.
    #[must_use]
    pub fn without_config_cache(self) -> Self {
        self.with_config_cache_ttl(Duration::ZERO)
    }

    /// Fetches the partner configuration, served from cache while fresh.
    ///
    /// # Errors
    ///
    /// Returns [`RevolutClientError`] if the HTTP request fails.
    pub async fn config(&self) -> Result<RevolutConfig, RevolutClientError> {
        if let Some(config) = self.config_cache.get().await {
            return Ok(config);
        }

        #[cfg(feature = "telemetry")]
        tracing::info!("ramp_support.revolut_client.config_cache_miss");

        let config = self.fetch_config().await?;
        self.config_cache.set(config.clone()).await;
        Ok(config)
    }

    /// Fetches the partner configuration, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`RevolutClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "ramp_support.revolut_client.config",
            skip_all,
            err,
            fields(
                timeout = ?self.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn fetch_config(&self) -> Result<RevolutConfig, RevolutClientError> {
        self.get_json(&self.config_url, "GET /partners/api/2.0/config")
            .await
    }

    async fn get_json<R>(&self, url: &Url, context: &'static str) -> Result<R, RevolutClientError>
    where
        R: serde::de::DeserializeOwned,
    {
        let mut req = self.client.get(url.clone()).headers(self.headers.clone());
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_response = req
            .send()
            .await
            .map_err(|e| RevolutClientError::Http { context, source: e })?;

        let result = if http_response.status() == StatusCode::OK {
            http_response
                .json::<R>()
                .await
                .map_err(|e| RevolutClientError::JsonDeserialization { context, source: e })
        } else {
            let status = http_response.status();
            let body = http_response
                .text()
                .await
                .map_err(|e| RevolutClientError::ResponseBodyRead { context, source: e })?;
            Err(RevolutClientError::HttpStatus {
                context,
                status,
                body,
            })
        };

        record_result_on_span(&result);

        result
    }
}

#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to Revolut failed");
        }
    }
}

#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
