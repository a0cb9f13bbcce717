//! Pipeline error types.

use domain::{TransactionId, ValidationError};
use thiserror::Error;

/// Errors that can abort an order's fulfillment.
///
/// Each stage fails fast with a single structured error; the orchestrator
/// never retries a stage. These are simulated failures, not transient ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Catalog lookup resolved zero items.
    #[error("no catalog entries matched the requested identifiers")]
    LookupEmpty,

    /// Stock verification found an unavailable item. Carries the title of
    /// the FIRST unavailable item in input order.
    #[error("stock check failed: \"{0}\" is out of stock")]
    OutOfStock(String),

    /// The payment gateway declined the charge.
    #[error("payment failed: card declined")]
    PaymentDeclined,

    /// The invoice issuer did not recognize the transaction.
    #[error("unknown transaction: {0}")]
    UnknownTransaction(TransactionId),

    /// Confirmation delivery failed. Best-effort: the orchestrator logs
    /// this and still completes the order.
    #[error("confirmation delivery failed: {0}")]
    NotificationFailed(String),

    /// Malformed input detected at a stage boundary.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for pipeline results.
pub type Result<T> = std::result::Result<T, PipelineError>;
