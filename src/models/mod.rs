//! Typed models for the gemshop gateway's JSON bodies.
//!
//! Field names follow the gateway's camelCase wire format. Every model is
//! read-only on the client: values are replaced wholesale by the next
//! successful read rather than patched locally.

pub mod auth;
pub mod cart;
pub mod order;
pub mod product;

pub use auth::{AuthResponse, SignInRequest, SignUpRequest};
pub use cart::{Cart, CartItem};
pub use order::{CheckoutRequest, Order, OrderItem, ShippingDetails};
pub use product::Product;

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A password or bearer token that is zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Returns the secret for use in a request.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}
