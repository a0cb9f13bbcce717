//! The validated order request accepted at the system boundary.

use std::collections::HashSet;

use common::Sku;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A well-formed order request.
///
/// All input validation happens here, once, instead of being scattered
/// across the pipeline stages. A constructed request is guaranteed to have
/// a non-blank payer and delivery address and a non-empty list of unique,
/// non-blank SKUs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    payer: String,
    address: String,
    skus: Vec<Sku>,
}

impl OrderRequest {
    /// Validates and constructs an order request.
    pub fn new(
        payer: impl Into<String>,
        address: impl Into<String>,
        skus: Vec<Sku>,
    ) -> Result<Self, ValidationError> {
        let payer = payer.into();
        let address = address.into();

        if payer.trim().is_empty() {
            return Err(ValidationError::BlankPayer);
        }
        if address.trim().is_empty() {
            return Err(ValidationError::BlankAddress);
        }
        if skus.is_empty() {
            return Err(ValidationError::EmptySkuList);
        }

        let mut seen = HashSet::new();
        for (position, sku) in skus.iter().enumerate() {
            if sku.is_blank() {
                return Err(ValidationError::BlankSku(position));
            }
            if !seen.insert(sku.clone()) {
                return Err(ValidationError::DuplicateSku(sku.clone()));
            }
        }

        Ok(Self {
            payer,
            address,
            skus,
        })
    }

    /// Returns the payer name.
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Returns the delivery address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the requested SKUs in order.
    pub fn skus(&self) -> &[Sku] {
        &self.skus
    }
}
