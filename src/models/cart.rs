//! Cart models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of the signed-in user's cart from `GET /cart`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Total as computed by the server. Display uses
    /// [`cart_total`](crate::pricing::cart_total) instead.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

impl Cart {
    /// Returns whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One product entry within a cart.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    pub product_id: u64,
    #[serde(default)]
    pub product_name: Option<String>,
    /// Unit price; absent prices are priced at zero.
    #[serde(default)]
    pub product_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Display name, falling back when the product name was not joined in.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.product_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Product Name Not Available")
    }
}
