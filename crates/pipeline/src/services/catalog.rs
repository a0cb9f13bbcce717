//! Catalog lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::Sku;
use domain::{LineItem, Money};

use crate::error::PipelineError;

/// A read-only catalog entry.
#[derive(Debug, Clone)]
struct CatalogEntry {
    title: String,
    unit_price: Money,
    available: bool,
}

/// Trait for resolving SKUs to priced, stocked line items.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Resolves SKUs to line items, preserving input order.
    ///
    /// Lenient lookup: unknown SKUs are silently dropped, never an error.
    /// Suspends the caller for the source's simulated latency.
    async fn fetch(&self, skus: &[Sku]) -> Result<Vec<LineItem>, PipelineError>;
}

/// In-memory catalog for testing and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Arc<RwLock<HashMap<Sku, CatalogEntry>>>,
    delay: Duration,
}

impl InMemoryCatalog {
    /// Creates an empty catalog with no lookup latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with the given simulated lookup latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            entries: Arc::default(),
            delay,
        }
    }

    /// Seeds the two demo bookstore titles.
    pub fn with_demo_titles(delay: Duration) -> Self {
        let catalog = Self::with_delay(delay);
        catalog.insert("JS101", "JavaScript Basics", Money::from_cents(29900), true);
        catalog.insert("NODE201", "Node.js Guide", Money::from_cents(34900), true);
        catalog
    }

    /// Adds or replaces a catalog entry.
    pub fn insert(
        &self,
        sku: impl Into<Sku>,
        title: impl Into<String>,
        unit_price: Money,
        available: bool,
    ) {
        self.entries.write().unwrap().insert(
            sku.into(),
            CatalogEntry {
                title: title.into(),
                unit_price,
                available,
            },
        );
    }

    /// Returns the number of catalog entries.
    pub fn entry_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch(&self, skus: &[Sku]) -> Result<Vec<LineItem>, PipelineError> {
        tokio::time::sleep(self.delay).await;

        let entries = self.entries.read().unwrap();
        let items = skus
            .iter()
            .filter_map(|sku| {
                entries.get(sku).map(|entry| {
                    LineItem::new(
                        sku.clone(),
                        entry.title.clone(),
                        entry.unit_price,
                        entry.available,
                    )
                })
            })
            .collect();

        Ok(items)
    }
}
