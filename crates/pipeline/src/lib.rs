//! Sequential order fulfillment pipeline.
//!
//! This crate orchestrates a mock bookstore order through five stages:
//! 1. Catalog lookup (SKUs → priced line items, unknown SKUs dropped)
//! 2. Stock verification (fail-fast on the first unavailable title)
//! 3. Payment (charge the order total)
//! 4. Invoice generation
//! 5. Confirmation delivery (best-effort)
//!
//! Any stage failure aborts the downstream stages. If payment already
//! succeeded before a later stage fails, the orchestrator issues exactly
//! one compensating cancellation against that transaction.

pub mod config;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod record;
pub mod services;
pub mod stages;
pub mod state;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use events::PipelineEvent;
pub use orchestrator::{Fulfillment, Orchestrator};
pub use record::FulfillmentRecord;
pub use services::{
    CatalogSource, InMemoryCatalog, InMemoryInvoiceIssuer, InMemoryNotifier,
    InMemoryPaymentGateway, InMemoryStockVerifier, InvoiceIssuer, Notifier, PaymentGateway,
    StockVerifier, DEMO_INVOICE_NUMBER, DEMO_TRANSACTION_ID,
};
pub use state::PipelineState;
