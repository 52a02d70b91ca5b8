//! Fluent support queries.
//!
//! A query walks the tree level by level, carrying the *set* of nodes matched
//! so far: an explicit key and a match-all rule can both apply at once, so
//! later levels are matched against every surviving branch.
//!
//! ```rust
//! use ramp_support::{DirectionKey, PaymentMethod, ProviderSupportStore};
//!
//! let mut store = ProviderSupportStore::new("test");
//! store.add().direction(DirectionKey::Buy).region("UK");
//!
//! let is = store.is();
//! assert!(is.direction(DirectionKey::Buy).region("UK:JQ").supported());
//! assert!(!is.direction(DirectionKey::Sell).supported());
//! ```
//!
//! A key that matches nothing is not an error: the step reports
//! `supported() == false` and every later step does the same.

use crate::key::{DirectionKey, PaymentKey};
use crate::tree::{SupportNode, query_nodes};

/// Entry point of the query chain, positioned at the tree root.
#[derive(Debug, Clone, Copy)]
pub struct SupportQuery<'a> {
    root: &'a SupportNode,
}

impl<'a> SupportQuery<'a> {
    pub(crate) const fn new(root: &'a SupportNode) -> Self {
        Self { root }
    }

    /// Matches a direction key against the root.
    #[must_use]
    pub fn direction(&self, key: impl Into<DirectionKey>) -> DirectionMatch<'a> {
        DirectionMatch {
            nodes: query_nodes(&[self.root], key.into().as_str()),
        }
    }
}

/// Nodes matched by a direction query.
#[derive(Debug, Clone)]
pub struct DirectionMatch<'a> {
    nodes: Vec<&'a SupportNode>,
}

impl<'a> DirectionMatch<'a> {
    /// Returns `true` if any node matched.
    #[must_use]
    pub fn supported(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Matches a region key against every node matched so far.
    #[must_use]
    pub fn region(&self, key: &str) -> RegionMatch<'a> {
        RegionMatch {
            nodes: query_nodes(&self.nodes, key),
        }
    }
}

/// Nodes matched by a region query.
#[derive(Debug, Clone)]
pub struct RegionMatch<'a> {
    nodes: Vec<&'a SupportNode>,
}

impl<'a> RegionMatch<'a> {
    /// Returns `true` if any node matched.
    #[must_use]
    pub fn supported(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Matches a fiat key against every node matched so far.
    #[must_use]
    pub fn fiat(&self, key: &str) -> FiatMatch<'a> {
        FiatMatch {
            nodes: query_nodes(&self.nodes, key),
        }
    }
}

/// Nodes matched by a fiat query.
#[derive(Debug, Clone)]
pub struct FiatMatch<'a> {
    nodes: Vec<&'a SupportNode>,
}

impl<'a> FiatMatch<'a> {
    /// Returns `true` if any node matched.
    #[must_use]
    pub fn supported(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Matches a payment key against every node matched so far.
    #[must_use]
    pub fn payment(&self, key: impl Into<PaymentKey>) -> PaymentMatch<'a> {
        PaymentMatch {
            nodes: query_nodes(&self.nodes, key.into().as_str()),
        }
    }
}

/// Nodes matched by a payment query.
#[derive(Debug, Clone)]
pub struct PaymentMatch<'a> {
    nodes: Vec<&'a SupportNode>,
}

impl PaymentMatch<'_> {
    /// Returns `true` if any node matched.
    #[must_use]
    pub fn supported(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Matches a crypto key against every node matched so far.
    #[must_use]
    pub fn crypto(&self, key: &str) -> CryptoMatch {
        CryptoMatch {
            supported: !query_nodes(&self.nodes, key).is_empty(),
        }
    }
}

/// Result of the final, crypto-level query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoMatch {
    supported: bool,
}

impl CryptoMatch {
    /// Returns `true` if any node matched.
    #[must_use]
    pub const fn supported(&self) -> bool {
        self.supported
    }
}
