//! Fulfillment pipeline stage names.

/// Stage name: resolve SKUs against the catalog.
pub const STAGE_LOOKUP: &str = "catalog_lookup";

/// Stage name: verify every resolved item is in stock.
pub const STAGE_VERIFY_STOCK: &str = "verify_stock";

/// Stage name: charge the order total.
pub const STAGE_CHARGE: &str = "charge_payment";

/// Stage name: issue an invoice for the transaction.
pub const STAGE_INVOICE: &str = "generate_invoice";

/// Stage name: deliver the confirmation (best-effort).
pub const STAGE_NOTIFY: &str = "send_confirmation";
