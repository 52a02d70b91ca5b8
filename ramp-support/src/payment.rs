//! The closed set of fiat payment methods.
//!
//! Payment keys are the only tree level besides direction whose values are
//! restricted. Anything outside [`PaymentMethod::ALL`] (other than the two
//! special qualifiers) is rejected when a tree is read through
//! [`ProviderSupportStore::from_json`](crate::ProviderSupportStore::from_json).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyParseError;
use crate::key::Level;

/// A payment rail a fiat provider can settle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// US ACH bank transfer.
    Ach,
    /// Apple Pay.
    ApplePay,
    /// Colombian bank transfer.
    ColombiaBank,
    /// Credit or debit card.
    Credit,
    /// Direct-to-bank payout.
    DirectToBank,
    /// UK Faster Payments.
    FasterPayments,
    /// Google Pay.
    GooglePay,
    /// Instant ACH.
    Iach,
    /// Dutch iDEAL.
    Ideal,
    /// Canadian Interac e-Transfer.
    Interac,
    /// Instant open banking.
    IoBank,
    /// Mexican bank transfer.
    MexicoBank,
    /// Australian `PayID`.
    PayId,
    /// `PayPal`.
    Paypal,
    /// Brazilian Pix.
    Pix,
    /// Colombian PSE.
    Pse,
    /// Revolut in-app payment.
    Revolut,
    /// SEPA bank transfer.
    Sepa,
    /// Mexican SPEI.
    Spei,
    /// Turkish bank transfer.
    TurkishBank,
    /// Venmo.
    Venmo,
    /// Wire transfer.
    Wire,
}

impl PaymentMethod {
    /// Every known payment method, in wire-name order.
    pub const ALL: [Self; 22] = [
        Self::Ach,
        Self::ApplePay,
        Self::ColombiaBank,
        Self::Credit,
        Self::DirectToBank,
        Self::FasterPayments,
        Self::GooglePay,
        Self::Iach,
        Self::Ideal,
        Self::Interac,
        Self::IoBank,
        Self::MexicoBank,
        Self::PayId,
        Self::Paypal,
        Self::Pix,
        Self::Pse,
        Self::Revolut,
        Self::Sepa,
        Self::Spei,
        Self::TurkishBank,
        Self::Venmo,
        Self::Wire,
    ];

    /// Returns the wire name used as a tree key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ach => "ach",
            Self::ApplePay => "applepay",
            Self::ColombiaBank => "colombiabank",
            Self::Credit => "credit",
            Self::DirectToBank => "directtobank",
            Self::FasterPayments => "fasterpayments",
            Self::GooglePay => "googlepay",
            Self::Iach => "iach",
            Self::Ideal => "ideal",
            Self::Interac => "interac",
            Self::IoBank => "iobank",
            Self::MexicoBank => "mexicobank",
            Self::PayId => "payid",
            Self::Paypal => "paypal",
            Self::Pix => "pix",
            Self::Pse => "pse",
            Self::Revolut => "revolut",
            Self::Sepa => "sepa",
            Self::Spei => "spei",
            Self::TurkishBank => "turkishbank",
            Self::Venmo => "venmo",
            Self::Wire => "wire",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| KeyParseError::new(Level::Payment, s))
    }
}
