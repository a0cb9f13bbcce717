//! Stage service traits and in-memory implementations with simulated latency.

pub mod catalog;
pub mod invoice;
pub mod notify;
pub mod payment;
pub mod stock;

pub use catalog::{CatalogSource, InMemoryCatalog};
pub use invoice::{InMemoryInvoiceIssuer, InvoiceIssuer, DEMO_INVOICE_NUMBER};
pub use notify::{InMemoryNotifier, Notifier};
pub use payment::{InMemoryPaymentGateway, PaymentGateway, DEMO_TRANSACTION_ID};
pub use stock::{InMemoryStockVerifier, StockVerifier};
