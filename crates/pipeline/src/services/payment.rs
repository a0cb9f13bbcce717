//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::{Cancellation, Money, Transaction, TransactionId, ValidationError};

use crate::error::PipelineError;

/// Fixed transaction ID issued by the in-memory gateway, matching the
/// original demo output.
pub const DEMO_TRANSACTION_ID: u64 = 56892;

/// Trait for payment processing operations.
///
/// A charge is atomic from the caller's perspective: exactly one outcome
/// per call, no partial charges.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the payer for the given amount.
    async fn charge(&self, payer: &str, amount: Money) -> Result<Transaction, PipelineError>;

    /// Compensating action: cancels a previously successful charge.
    ///
    /// Always acknowledges in the current design; callers must guard
    /// against issuing a double rollback themselves.
    async fn cancel(&self, transaction_id: TransactionId)
        -> Result<Cancellation, PipelineError>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    payments: HashMap<TransactionId, (String, Money)>,
    cancellations: Vec<TransactionId>,
    fail_on_charge: bool,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
    charge_delay: Duration,
    cancel_delay: Duration,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory gateway with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway with the given simulated latencies.
    pub fn with_delays(charge_delay: Duration, cancel_delay: Duration) -> Self {
        Self {
            state: Arc::default(),
            charge_delay,
            cancel_delay,
        }
    }

    /// Configures the gateway to decline every charge.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.write().unwrap().fail_on_charge = fail;
    }

    /// Returns the number of uncancelled payments.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Returns true if an uncancelled payment exists with the given ID.
    pub fn has_payment(&self, transaction_id: TransactionId) -> bool {
        self.state
            .read()
            .unwrap()
            .payments
            .contains_key(&transaction_id)
    }

    /// Returns every cancellation issued, in order.
    pub fn cancellations(&self) -> Vec<TransactionId> {
        self.state.read().unwrap().cancellations.clone()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn charge(&self, payer: &str, amount: Money) -> Result<Transaction, PipelineError> {
        tokio::time::sleep(self.charge_delay).await;

        if amount.is_negative() {
            return Err(ValidationError::NegativeAmount(amount.cents()).into());
        }

        let mut state = self.state.write().unwrap();
        if state.fail_on_charge {
            return Err(PipelineError::PaymentDeclined);
        }

        let transaction_id = TransactionId::new(DEMO_TRANSACTION_ID);
        state
            .payments
            .insert(transaction_id, (payer.to_string(), amount));

        Ok(Transaction::new(transaction_id, amount, payer))
    }

    async fn cancel(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Cancellation, PipelineError> {
        tokio::time::sleep(self.cancel_delay).await;

        let mut state = self.state.write().unwrap();
        state.payments.remove(&transaction_id);
        state.cancellations.push(transaction_id);

        Ok(Cancellation::acknowledged(transaction_id))
    }
}
