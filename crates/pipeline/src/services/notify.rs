//! Confirmation delivery trait and in-memory implementation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::Confirmation;

use crate::error::PipelineError;

/// Trait for confirmation delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers a confirmation referencing the invoice to the address.
    async fn send(
        &self,
        address: &str,
        invoice_number: &str,
    ) -> Result<Confirmation, PipelineError>;
}

#[derive(Debug, Default)]
struct InMemoryNotifierState {
    sent: Vec<Confirmation>,
    fail_on_send: bool,
}

/// In-memory notifier for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    state: Arc<RwLock<InMemoryNotifierState>>,
    delay: Duration,
}

impl InMemoryNotifier {
    /// Creates a new in-memory notifier with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier with the given simulated delivery latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: Arc::default(),
            delay,
        }
    }

    /// Configures the notifier to refuse delivery.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of confirmations delivered.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }

    /// Returns the delivered confirmation messages, in order.
    pub fn sent_messages(&self) -> Vec<String> {
        self.state
            .read()
            .unwrap()
            .sent
            .iter()
            .map(|c| c.message.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(
        &self,
        address: &str,
        invoice_number: &str,
    ) -> Result<Confirmation, PipelineError> {
        tokio::time::sleep(self.delay).await;

        let mut state = self.state.write().unwrap();
        if state.fail_on_send {
            return Err(PipelineError::NotificationFailed(
                "delivery refused".to_string(),
            ));
        }

        let confirmation = Confirmation::new(format!(
            "Confirmation email sent to: {address} (Invoice {invoice_number})"
        ));
        state.sent.push(confirmation.clone());

        Ok(confirmation)
    }
}
