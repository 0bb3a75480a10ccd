//! Order models and the checkout request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// A placed order from `GET /orders` or `POST /orders`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    /// Creation timestamp as sent by the gateway (ISO-8601 local time).
    #[serde(default)]
    pub order_date: String,
    pub total_amount: Decimal,
    /// Status label, opaque to the client (e.g. `PENDING`).
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub shipping_city: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Returns the date portion (`YYYY-MM-DD`) of the order timestamp.
    #[must_use]
    pub fn placed_on(&self) -> &str {
        self.order_date
            .split_once('T')
            .map_or(self.order_date.as_str(), |(date, _)| date)
    }
}

/// A line of an order, priced at the time the order was placed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub product_id: u64,
    #[serde(default)]
    pub product_name: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl OrderItem {
    /// Line total at the recorded unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Optional shipping and payment details attached to a checkout.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(flatten)]
    pub shipping: ShippingDetails,
}

impl CheckoutRequest {
    /// Builds a checkout for `items`, totalling them with the pricing rules.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total_amount = crate::pricing::cart_total(&items);
        Self {
            items,
            total_amount,
            shipping: ShippingDetails::default(),
        }
    }
}
