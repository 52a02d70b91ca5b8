//! Tree keys, special qualifiers and the key-matching predicate.
//!
//! Every level of a support tree is keyed by a plain string. Two values are
//! reserved at every level:
//!
//! - [`MATCH_ALL`] (`"*"`) applies to every key at the level, in addition to
//!   the ones listed explicitly. A node stored under it is only pulled into a
//!   query result when something else matched, or when the query is `"*"`.
//! - [`MATCH_ANY`] (`""`) applies to any query at all, including keys that
//!   were never listed. Nodes stored under it always match.
//!
//! Keys may be composite: `"US:CA"` has group `US` and sub-part `CA`. See
//! [`key_matches_query`] for how groups and sub-parts are compared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::KeyParseError;
use crate::payment::PaymentMethod;

/// Tree key meaning "every key at this level".
pub const MATCH_ALL: &str = "*";

/// Tree key meaning "any key at this level, listed or not".
pub const MATCH_ANY: &str = "";

/// Separator between the group and sub-part of a composite key.
pub const KEY_SEPARATOR: char = ':';

/// Literal token id used in crypto keys for a chain's native asset.
pub const NATIVE_TOKEN_ID: &str = "null";

/// One of the two reserved key values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// The match-all qualifier, `"*"`.
    All,
    /// The match-any qualifier, `""`.
    Any,
}

impl Qualifier {
    /// Returns the reserved key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => MATCH_ALL,
            Self::Any => MATCH_ANY,
        }
    }

    /// Recognizes a reserved key string.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            MATCH_ALL => Some(Self::All),
            MATCH_ANY => Some(Self::Any),
            _ => None,
        }
    }
}

/// Returns `true` if `key` is one of the reserved qualifier strings.
#[must_use]
pub fn is_qualifier(key: &str) -> bool {
    Qualifier::from_key(key).is_some()
}

/// The five levels of a support tree, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// Buy or sell.
    Direction,
    /// Country, optionally with a subdivision (`"US:CA"`).
    Region,
    /// Fiat currency (`"iso:USD"`).
    Fiat,
    /// Payment method.
    Payment,
    /// Crypto asset (`"ethereum:null"`).
    Crypto,
}

impl Level {
    /// All levels in tree order.
    pub const ALL: [Self; 5] = [
        Self::Direction,
        Self::Region,
        Self::Fiat,
        Self::Payment,
        Self::Crypto,
    ];

    /// Returns the level nested directly below this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Direction => Some(Self::Region),
            Self::Region => Some(Self::Fiat),
            Self::Fiat => Some(Self::Payment),
            Self::Payment => Some(Self::Crypto),
            Self::Crypto => None,
        }
    }

    /// Returns the lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direction => "direction",
            Self::Region => "region",
            Self::Fiat => "fiat",
            Self::Payment => "payment",
            Self::Crypto => "crypto",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direction-level key: a transaction direction or a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    /// Fiat to crypto.
    Buy,
    /// Crypto to fiat.
    Sell,
    /// The match-all qualifier.
    All,
    /// The match-any qualifier.
    Any,
}

impl DirectionKey {
    /// Returns the tree key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::All => MATCH_ALL,
            Self::Any => MATCH_ANY,
        }
    }
}

impl From<Qualifier> for DirectionKey {
    fn from(value: Qualifier) -> Self {
        match value {
            Qualifier::All => Self::All,
            Qualifier::Any => Self::Any,
        }
    }
}

impl fmt::Display for DirectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectionKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            MATCH_ALL => Ok(Self::All),
            MATCH_ANY => Ok(Self::Any),
            _ => Err(KeyParseError::new(Level::Direction, s)),
        }
    }
}

/// A payment-level key: a known payment method or a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentKey {
    /// A specific payment method.
    Method(PaymentMethod),
    /// The match-all qualifier.
    All,
    /// The match-any qualifier.
    Any,
}

impl PaymentKey {
    /// Returns the tree key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method(method) => method.as_str(),
            Self::All => MATCH_ALL,
            Self::Any => MATCH_ANY,
        }
    }
}

impl From<PaymentMethod> for PaymentKey {
    fn from(value: PaymentMethod) -> Self {
        Self::Method(value)
    }
}

impl From<Qualifier> for PaymentKey {
    fn from(value: Qualifier) -> Self {
        match value {
            Qualifier::All => Self::All,
            Qualifier::Any => Self::Any,
        }
    }
}

impl fmt::Display for PaymentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Qualifier::from_key(s) {
            Some(qualifier) => Ok(qualifier.into()),
            None => s.parse().map(Self::Method),
        }
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_str(&s).map_err(de::Error::custom)
            }
        }
    };
}

string_serde!(DirectionKey);
string_serde!(PaymentKey);

/// A crypto asset identified by chain plugin id and optional token id.
///
/// Formats as the composite crypto key `"<plugin_id>:<token_id>"`, with the
/// literal `null` standing in for the chain's native asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CryptoAssetKey {
    /// Chain plugin id (e.g. `ethereum`).
    pub plugin_id: String,
    /// Token id, or `None` for the native asset.
    pub token_id: Option<String>,
}

impl CryptoAssetKey {
    /// Creates a key for a chain's native asset.
    pub fn native(plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            token_id: None,
        }
    }

    /// Creates a key for a token on a chain.
    pub fn token(plugin_id: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            token_id: Some(token_id.into()),
        }
    }

    /// Splits a crypto tree key into chain and token parts.
    ///
    /// A key without a separator is read as the chain's native asset.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        let (plugin_id, token) = split_key(key);
        Self {
            plugin_id: plugin_id.to_owned(),
            token_id: token
                .filter(|token| *token != NATIVE_TOKEN_ID)
                .map(str::to_owned),
        }
    }
}

impl fmt::Display for CryptoAssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token_id.as_deref().unwrap_or(NATIVE_TOKEN_ID);
        write!(f, "{}{KEY_SEPARATOR}{token}", self.plugin_id)
    }
}

/// Splits a key on its first separator into group and optional sub-part.
#[must_use]
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(KEY_SEPARATOR) {
        Some((group, sub)) => (group, Some(sub)),
        None => (key, None),
    }
}

/// Returns `true` if the stored `key` is selected by `query`.
///
/// - A query group of `*` selects everything.
/// - Otherwise the groups must be equal, and then the key is selected when the
///   sub-parts are equal, when the query sub-part is `*`, or when the key has
///   no sub-part at all (a bare `UK` answers for `UK:JQ`).
///
/// The predicate is not symmetric. Calling it with the arguments swapped asks
/// whether the stored key, read as a selector, covers the query.
#[must_use]
pub fn key_matches_query(key: &str, query: &str) -> bool {
    let (key_group, key_sub) = split_key(key);
    let (query_group, query_sub) = split_key(query);

    if query_group == MATCH_ALL {
        return true;
    }
    if query_group != key_group {
        return false;
    }

    query_sub == key_sub || query_sub == Some(MATCH_ALL) || key_sub.is_none_or(str::is_empty)
}
