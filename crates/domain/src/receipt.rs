//! Invoices and delivery confirmations.

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionId;

/// An invoice bound to a successful transaction.
///
/// One invoice is issued per successful transaction, only after the
/// transaction exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number assigned by the issuer.
    pub number: String,

    /// The transaction this invoice settles.
    pub transaction_id: TransactionId,
}

impl Invoice {
    /// Creates a new invoice.
    pub fn new(number: impl Into<String>, transaction_id: TransactionId) -> Self {
        Self {
            number: number.into(),
            transaction_id,
        }
    }
}

/// A human-readable delivery confirmation. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// The formatted confirmation message.
    pub message: String,
}

impl Confirmation {
    /// Creates a confirmation from a formatted message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
