//! Invoice issuer trait and in-memory implementation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::{Invoice, TransactionId};

use crate::error::PipelineError;

/// Fixed invoice number issued by the in-memory issuer, matching the
/// original demo output.
pub const DEMO_INVOICE_NUMBER: &str = "INV1023";

/// Trait for invoice generation.
#[async_trait]
pub trait InvoiceIssuer: Send + Sync {
    /// Issues an invoice bound to a successful transaction.
    ///
    /// Fails with [`PipelineError::UnknownTransaction`] when the
    /// transaction is not recognized.
    async fn issue(&self, transaction_id: TransactionId) -> Result<Invoice, PipelineError>;
}

#[derive(Debug, Default)]
struct InMemoryIssuerState {
    issued: Vec<Invoice>,
    fail_on_issue: bool,
}

/// In-memory invoice issuer for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvoiceIssuer {
    state: Arc<RwLock<InMemoryIssuerState>>,
    delay: Duration,
}

impl InMemoryInvoiceIssuer {
    /// Creates a new in-memory issuer with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an issuer with the given simulated latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: Arc::default(),
            delay,
        }
    }

    /// Configures the issuer to reject the next issue call as an unknown
    /// transaction.
    pub fn set_fail_on_issue(&self, fail: bool) {
        self.state.write().unwrap().fail_on_issue = fail;
    }

    /// Returns the number of invoices issued.
    pub fn issued_count(&self) -> usize {
        self.state.read().unwrap().issued.len()
    }
}

#[async_trait]
impl InvoiceIssuer for InMemoryInvoiceIssuer {
    async fn issue(&self, transaction_id: TransactionId) -> Result<Invoice, PipelineError> {
        tokio::time::sleep(self.delay).await;

        let mut state = self.state.write().unwrap();
        if state.fail_on_issue {
            return Err(PipelineError::UnknownTransaction(transaction_id));
        }

        let invoice = Invoice::new(DEMO_INVOICE_NUMBER, transaction_id);
        state.issued.push(invoice.clone());

        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_issue_binds_invoice_to_transaction() {
        let issuer = InMemoryInvoiceIssuer::with_delay(Duration::from_millis(300));
        let transaction_id = TransactionId::new(56892);

        let invoice = issuer.issue(transaction_id).await.unwrap();
        assert_eq!(invoice.number, DEMO_INVOICE_NUMBER);
        assert_eq!(invoice.transaction_id, transaction_id);
        assert_eq!(issuer.issued_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_on_issue_reports_unknown_transaction() {
        let issuer = InMemoryInvoiceIssuer::new();
        issuer.set_fail_on_issue(true);
        let transaction_id = TransactionId::new(56892);

        let result = issuer.issue(transaction_id).await;
        assert_eq!(
            result,
            Err(PipelineError::UnknownTransaction(transaction_id))
        );
        assert_eq!(issuer.issued_count(), 0);
    }
}
