//! Fluent insertion into a support tree.
//!
//! Each step descends one level, creating the node for its key if needed,
//! and hands back the builder for the next level:
//!
//! ```rust
//! use ramp_support::{DirectionKey, PaymentMethod, ProviderSupportStore};
//!
//! let mut store = ProviderSupportStore::new("bity");
//! store
//!     .add()
//!     .direction(DirectionKey::Sell)
//!     .region("*")
//!     .fiat("iso:EUR")
//!     .payment(PaymentMethod::Sepa)
//!     .crypto("bitcoin:null");
//!
//! // A shorter chain marks everything below it as supported.
//! store.add().direction(DirectionKey::Buy);
//! ```
//!
//! Insertion is idempotent: repeating a chain only ensures the path exists.

use crate::key::{DirectionKey, PaymentKey};
use crate::tree::SupportNode;

/// Entry point of the insertion chain, positioned at the tree root.
#[derive(Debug)]
pub struct SupportAdd<'a> {
    root: &'a mut SupportNode,
}

impl<'a> SupportAdd<'a> {
    pub(crate) const fn new(root: &'a mut SupportNode) -> Self {
        Self { root }
    }

    /// Ensures a direction node exists and descends into it.
    pub fn direction(self, key: impl Into<DirectionKey>) -> AddRegion<'a> {
        AddRegion {
            node: self.root.child_mut(key.into().as_str()),
        }
    }
}

/// Insertion positioned at a direction node.
#[derive(Debug)]
pub struct AddRegion<'a> {
    node: &'a mut SupportNode,
}

impl<'a> AddRegion<'a> {
    /// Ensures a region node exists and descends into it.
    pub fn region(self, key: &str) -> AddFiat<'a> {
        AddFiat {
            node: self.node.child_mut(key),
        }
    }
}

/// Insertion positioned at a region node.
#[derive(Debug)]
pub struct AddFiat<'a> {
    node: &'a mut SupportNode,
}

impl<'a> AddFiat<'a> {
    /// Ensures a fiat node exists and descends into it.
    pub fn fiat(self, key: &str) -> AddPayment<'a> {
        AddPayment {
            node: self.node.child_mut(key),
        }
    }
}

/// Insertion positioned at a fiat node.
#[derive(Debug)]
pub struct AddPayment<'a> {
    node: &'a mut SupportNode,
}

impl<'a> AddPayment<'a> {
    /// Ensures a payment node exists and descends into it.
    pub fn payment(self, key: impl Into<PaymentKey>) -> AddCrypto<'a> {
        AddCrypto {
            node: self.node.child_mut(key.into().as_str()),
        }
    }
}

/// Insertion positioned at a payment node.
#[derive(Debug)]
pub struct AddCrypto<'a> {
    node: &'a mut SupportNode,
}

impl AddCrypto<'_> {
    /// Ensures a crypto leaf exists. This ends the chain.
    pub fn crypto(self, key: &str) {
        self.node.child_mut(key);
    }
}
