//! Payment transactions and cancellation acknowledgments.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Identifier assigned by the payment gateway to a successful charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Creates a transaction ID from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TransactionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A successful payment charge.
///
/// Created exactly once per successful charge and immutable afterwards.
/// The orchestrator owns the transaction for the duration of the order;
/// the invoice generator and any rollback call reference it by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by the gateway.
    pub id: TransactionId,

    /// Amount charged.
    pub amount: Money,

    /// Who was charged.
    pub payer: String,
}

impl Transaction {
    /// Creates a new transaction record.
    pub fn new(id: TransactionId, amount: Money, payer: impl Into<String>) -> Self {
        Self {
            id,
            amount,
            payer: payer.into(),
        }
    }
}

/// Acknowledgment of a compensating payment cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// Always true in the current design; cancellation never fails.
    pub cancelled: bool,

    /// The transaction that was rolled back.
    pub transaction_id: TransactionId,
}

impl Cancellation {
    /// Creates an acknowledgment for the given transaction.
    pub fn acknowledged(transaction_id: TransactionId) -> Self {
        Self {
            cancelled: true,
            transaction_id,
        }
    }
}
