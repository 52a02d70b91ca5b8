//! CLI configuration.
//!
//! Loads configuration from a TOML file with support for environment variable
//! expansion. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! [revolut]
//! api_key = "$REVOLUT_API_KEY"
//! base_url = "https://ramp-partners.revolut.com"
//! timeout_secs = 30
//! cache_ttl_secs = 3600
//! tree_cache = "revolut-support.json"
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to configuration file (default: `ramp.toml`)
//! - Secrets referenced by `$VAR` in the config file

use std::path::{Path, PathBuf};
use std::time::Duration;

use ramp_support_revolut::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampConfig {
    /// Revolut partner API settings.
    #[serde(default)]
    pub revolut: RevolutSettings,
}

/// Settings for the Revolut partner API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevolutSettings {
    /// Partner API key. Supports `$VAR` / `${VAR}` expansion.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (default: production).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: `30`).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a fetched configuration is reused, in seconds (default: `3600`).
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Where `sync` writes the support tree (default: `revolut-support.json`).
    #[serde(default = "default_tree_cache")]
    pub tree_cache: PathBuf,
}

impl Default for RevolutSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            tree_cache: default_tree_cache(),
        }
    }
}

impl RevolutSettings {
    /// Returns the API key if one is set and its variable was resolved.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with('$'))
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the configuration cache TTL.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_cache_ttl_secs() -> u64 {
    60 * 60
}

fn default_tree_cache() -> PathBuf {
    PathBuf::from("revolut-support.json")
}

impl RampConfig {
    /// Loads configuration from the path given by the `CONFIG` environment
    /// variable, falling back to `ramp.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load() -> Result<Self, CliError> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "ramp.toml".to_owned());
        Self::load_from(Path::new(&path))
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_owned(),
                source,
            })?
        } else {
            String::new()
        };
        Self::from_toml(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML after expanding variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Toml`] if the expanded text is not valid.
    pub fn from_toml(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let expanded = expand_vars(content, lookup);
        Ok(toml::from_str(&expanded)?)
    }
}

/// Expands `$VAR` and `${VAR}` patterns using `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced && c == '}' {
                chars.next();
                closed = true;
                break;
            }
            if !braced && !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            name.push(c);
            chars.next();
        }

        match lookup(&name).filter(|_| !name.is_empty()) {
            Some(value) => result.push_str(&value),
            None => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "REVOLUT_API_KEY" => Some("secret".to_owned()),
            "HOST" => Some("ramp-partners.revolut.codes".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_vars() {
        assert_eq!(expand_vars("key = \"$REVOLUT_API_KEY\"", env), "key = \"secret\"");
        assert_eq!(expand_vars("https://${HOST}/x", env), "https://ramp-partners.revolut.codes/x");
        assert_eq!(expand_vars("$MISSING and ${MISSING}", env), "$MISSING and ${MISSING}");
        assert_eq!(expand_vars("cost: $ 5", env), "cost: $ 5");
        assert_eq!(expand_vars("${UNCLOSED", env), "${UNCLOSED");
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = RampConfig::from_toml("", env).unwrap();
        assert_eq!(config, RampConfig::default());
        assert_eq!(config.revolut.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.revolut.timeout(), Duration::from_secs(30));
        assert_eq!(config.revolut.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.revolut.api_key(), None);
    }

    #[test]
    fn test_revolut_section() {
        let config = RampConfig::from_toml(
            r#"
            [revolut]
            api_key = "$REVOLUT_API_KEY"
            base_url = "https://${HOST}"
            timeout_secs = 5
            tree_cache = "/tmp/tree.json"
            "#,
            env,
        )
        .unwrap();
        assert_eq!(config.revolut.api_key(), Some("secret"));
        assert_eq!(config.revolut.base_url, "https://ramp-partners.revolut.codes");
        assert_eq!(config.revolut.timeout(), Duration::from_secs(5));
        assert_eq!(config.revolut.cache_ttl_secs, 3600);
        assert_eq!(config.revolut.tree_cache, PathBuf::from("/tmp/tree.json"));
    }

    #[test]
    fn test_unresolved_api_key_is_missing() {
        let config =
            RampConfig::from_toml("[revolut]\napi_key = \"$NOT_SET\"\n", env).unwrap();
        assert_eq!(config.revolut.api_key.as_deref(), Some("$NOT_SET"));
        assert_eq!(config.revolut.api_key(), None);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RampConfig::from_toml("[revolut\n", env),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = RampConfig::load_from(Path::new("/nonexistent/ramp.toml")).unwrap();
        assert_eq!(config, RampConfig::default());
    }
}
