//! Catalog product models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as returned by `GET /products` and friends.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub color: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock_quantity: u32,
    /// Image file name, resolved through the gateway's image endpoint.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Free-form specification table (e.g. "Material" → "18k gold").
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    /// Returns whether the catalog reports any units in stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
