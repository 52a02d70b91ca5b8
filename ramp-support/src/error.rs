//! Error types for support-tree parsing and validation.

use crate::key::Level;

/// Errors produced when a support tree is read from or written to JSON.
///
/// Validation failures carry the slash-separated path of the offending
/// node (e.g. `sell/*/iso:EUR`) so that a bad cache entry can be located.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SupportTreeError {
    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A key is outside the closed set allowed at its level.
    #[error("invalid {level} key {key:?} at '{path}'")]
    InvalidKey {
        /// The level the key was found at.
        level: Level,
        /// The rejected key.
        key: String,
        /// Path of the parent node.
        path: String,
    },

    /// A node value is neither `true` nor a nested object.
    #[error("invalid {level} value at '{path}': expected {expected}, found {found}")]
    InvalidValue {
        /// The level the value was found at.
        level: Level,
        /// Path of the offending node.
        path: String,
        /// What the level accepts.
        expected: &'static str,
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// The document root is not a JSON object.
    #[error("support tree root must be an object, found {found}")]
    NotAnObject {
        /// The JSON type that was found instead.
        found: &'static str,
    },
}

/// Error returned when parsing a key of a closed key set fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {level} key {key:?}")]
pub struct KeyParseError {
    /// The level whose key set rejected the input.
    pub level: Level,
    /// The rejected input.
    pub key: String,
}

impl KeyParseError {
    /// Creates a new key parse error.
    #[must_use]
    pub fn new(level: Level, key: impl Into<String>) -> Self {
        Self {
            level,
            key: key.into(),
        }
    }
}
