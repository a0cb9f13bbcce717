//! Catalog line items and the verified order that wraps them.

use std::collections::HashSet;

use common::Sku;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// A priced, stocked catalog entry resolved from a SKU.
///
/// Produced by catalog lookup. Immutable once verified, except for the
/// `available` flag which the stock verifier recomputes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The catalog identifier this item was resolved from.
    pub sku: Sku,

    /// Human-readable title.
    pub title: String,

    /// Price per unit in cents.
    pub unit_price: Money,

    /// Whether the item is currently in stock.
    pub available: bool,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        sku: impl Into<Sku>,
        title: impl Into<String>,
        unit_price: Money,
        available: bool,
    ) -> Self {
        Self {
            sku: sku.into(),
            title: title.into(),
            unit_price,
            available,
        }
    }

    /// Returns a copy of this item with the availability flag replaced.
    pub fn with_availability(&self, available: bool) -> Self {
        Self {
            available,
            ..self.clone()
        }
    }
}

/// An ordered, non-empty sequence of available line items with unique SKUs.
///
/// Constructed after stock verification; the invariants are enforced at
/// construction so downstream stages never re-check them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedOrder {
    items: Vec<LineItem>,
}

impl VerifiedOrder {
    /// Wraps a sequence of line items, enforcing the order invariants.
    ///
    /// Fails if the sequence is empty, contains a duplicate SKU, or
    /// contains an item that is not available.
    pub fn new(items: Vec<LineItem>) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !item.available {
                return Err(ValidationError::UnavailableItem(item.title.clone()));
            }
            if !seen.insert(item.sku.clone()) {
                return Err(ValidationError::DuplicateSku(item.sku.clone()));
            }
        }

        Ok(Self { items })
    }

    /// Returns the line items in order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the order total (sum of unit prices).
    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.unit_price).sum()
    }
}

impl<'a> IntoIterator for &'a VerifiedOrder {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js101() -> LineItem {
        LineItem::new("JS101", "JavaScript Basics", Money::from_cents(29900), true)
    }

    fn node201() -> LineItem {
        LineItem::new("NODE201", "Node.js Guide", Money::from_cents(34900), true)
    }

    #[test]
    fn with_availability_only_touches_the_flag() {
        let item = js101();
        let out = item.with_availability(false);
        assert!(!out.available);
        assert_eq!(out.sku, item.sku);
        assert_eq!(out.title, item.title);
        assert_eq!(out.unit_price, item.unit_price);
    }

    #[test]
    fn verified_order_total() {
        let order = VerifiedOrder::new(vec![js101(), node201()]).unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(order.total(), Money::from_cents(64800));
    }

    #[test]
    fn verified_order_rejects_empty() {
        assert_eq!(
            VerifiedOrder::new(vec![]),
            Err(ValidationError::EmptyOrder)
        );
    }

    #[test]
    fn verified_order_rejects_unavailable_item() {
        let result = VerifiedOrder::new(vec![js101(), node201().with_availability(false)]);
        assert_eq!(
            result,
            Err(ValidationError::UnavailableItem("Node.js Guide".to_string()))
        );
    }

    #[test]
    fn verified_order_rejects_duplicate_sku() {
        let result = VerifiedOrder::new(vec![js101(), js101()]);
        assert_eq!(
            result,
            Err(ValidationError::DuplicateSku(Sku::new("JS101")))
        );
    }

    #[test]
    fn verified_order_preserves_input_order() {
        let order = VerifiedOrder::new(vec![node201(), js101()]).unwrap();
        let titles: Vec<&str> = order
            .items()
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, ["Node.js Guide", "JavaScript Basics"]);
    }
}
