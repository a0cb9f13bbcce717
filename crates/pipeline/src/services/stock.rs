//! Stock verification trait and in-memory implementation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::LineItem;

use crate::error::PipelineError;

/// Trait for stock availability checks.
#[async_trait]
pub trait StockVerifier: Send + Sync {
    /// Returns the input sequence with availability recomputed.
    ///
    /// Fails fast with [`PipelineError::OutOfStock`] naming the FIRST
    /// unavailable item in input order. Known sharp edge: only one title
    /// is reported even when several items are unavailable; callers that
    /// need full diagnostics must re-run per item.
    async fn verify(&self, items: Vec<LineItem>) -> Result<Vec<LineItem>, PipelineError>;
}

#[derive(Debug, Default)]
struct InMemoryVerifierState {
    force_unavailable: Option<String>,
    verifications: u32,
}

/// In-memory stock verifier for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockVerifier {
    state: Arc<RwLock<InMemoryVerifierState>>,
    delay: Duration,
}

impl InMemoryStockVerifier {
    /// Creates a new in-memory stock verifier with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a verifier with the given simulated check latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: Arc::default(),
            delay,
        }
    }

    /// Forces the item with the given title to verify as unavailable.
    pub fn force_unavailable(&self, title: impl Into<String>) {
        self.state.write().unwrap().force_unavailable = Some(title.into());
    }

    /// Clears the forced-unavailable override.
    pub fn clear_override(&self) {
        self.state.write().unwrap().force_unavailable = None;
    }

    /// Returns the number of verify calls made.
    pub fn verification_count(&self) -> u32 {
        self.state.read().unwrap().verifications
    }
}

#[async_trait]
impl StockVerifier for InMemoryStockVerifier {
    async fn verify(&self, items: Vec<LineItem>) -> Result<Vec<LineItem>, PipelineError> {
        tokio::time::sleep(self.delay).await;

        let mut state = self.state.write().unwrap();
        state.verifications += 1;
        let forced = state.force_unavailable.clone();
        drop(state);

        let refreshed: Vec<LineItem> = items
            .into_iter()
            .map(|item| match &forced {
                Some(title) if item.title == *title => item.with_availability(false),
                _ => item,
            })
            .collect();

        if let Some(unavailable) = refreshed.iter().find(|item| !item.available) {
            return Err(PipelineError::OutOfStock(unavailable.title.clone()));
        }

        Ok(refreshed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Money;

    fn js101() -> LineItem {
        LineItem::new("JS101", "JavaScript Basics", Money::from_cents(29900), true)
    }

    fn node201() -> LineItem {
        LineItem::new("NODE201", "Node.js Guide", Money::from_cents(34900), true)
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_available_passes_through() {
        let verifier = InMemoryStockVerifier::with_delay(Duration::from_millis(250));

        let items = verifier.verify(vec![js101(), node201()]).await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.available));
        assert_eq!(verifier.verification_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_title_fails_with_that_title() {
        let verifier = InMemoryStockVerifier::new();
        verifier.force_unavailable("Node.js Guide");

        let result = verifier.verify(vec![js101(), node201()]).await;
        assert_eq!(
            result,
            Err(PipelineError::OutOfStock("Node.js Guide".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_first_unavailable_in_input_order() {
        let verifier = InMemoryStockVerifier::new();

        // Two already-unavailable items; input order decides which title
        // is reported.
        let result = verifier
            .verify(vec![
                node201().with_availability(false),
                js101().with_availability(false),
            ])
            .await;
        assert_eq!(
            result,
            Err(PipelineError::OutOfStock("Node.js Guide".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_override_restores_availability() {
        let verifier = InMemoryStockVerifier::new();
        verifier.force_unavailable("JavaScript Basics");
        verifier.clear_override();

        let items = verifier.verify(vec![js101()]).await.unwrap();
        assert!(items[0].available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preexisting_unavailability_is_respected() {
        let verifier = InMemoryStockVerifier::new();

        let result = verifier
            .verify(vec![js101(), node201().with_availability(false)])
            .await;
        assert_eq!(
            result,
            Err(PipelineError::OutOfStock("Node.js Guide".to_string()))
        );
    }
}
