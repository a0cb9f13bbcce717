//! Domain error types.

use common::Sku;
use thiserror::Error;

/// Errors produced when validating inputs at the system boundary.
///
/// Validation happens once, when an [`crate::OrderRequest`] is constructed;
/// the pipeline stages can then assume well-formed inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The order contained no item identifiers.
    #[error("order contains no item identifiers")]
    EmptySkuList,

    /// An item identifier was empty or all whitespace.
    #[error("blank item identifier at position {0}")]
    BlankSku(usize),

    /// The same SKU appeared more than once in the order.
    #[error("duplicate item identifier: {0}")]
    DuplicateSku(Sku),

    /// The payer name was empty or all whitespace.
    #[error("payer must not be blank")]
    BlankPayer,

    /// The delivery address was empty or all whitespace.
    #[error("delivery address must not be blank")]
    BlankAddress,

    /// A money amount was negative where a non-negative amount is required.
    #[error("amount must not be negative: {0} cents")]
    NegativeAmount(i64),

    /// A verified order must contain at least one line item.
    #[error("verified order must contain at least one item")]
    EmptyOrder,

    /// A verified order must only contain available items.
    #[error("item \"{0}\" is not available")]
    UnavailableItem(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ValidationError::EmptySkuList.to_string(),
            "order contains no item identifiers"
        );
        assert_eq!(
            ValidationError::DuplicateSku(Sku::new("JS101")).to_string(),
            "duplicate item identifier: JS101"
        );
        assert_eq!(
            ValidationError::NegativeAmount(-100).to_string(),
            "amount must not be negative: -100 cents"
        );
    }
}
