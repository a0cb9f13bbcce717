//! Domain layer for the fulfillment pipeline.
//!
//! This crate provides the value objects that flow through the pipeline:
//! - Money amounts in integer cents
//! - Catalog line items and verified orders
//! - Payment transactions and cancellation acknowledgments
//! - Invoices and delivery confirmations
//! - The validated order request accepted at the system boundary

pub mod error;
pub mod line_item;
pub mod money;
pub mod receipt;
pub mod request;
pub mod transaction;

pub use error::ValidationError;
pub use line_item::{LineItem, VerifiedOrder};
pub use money::Money;
pub use receipt::{Confirmation, Invoice};
pub use request::OrderRequest;
pub use transaction::{Cancellation, Transaction, TransactionId};
