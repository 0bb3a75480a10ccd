//! Terminal storefront for the gemshop jewelry gateway.
//!
//! Provides a typed HTTP client for the gateway's product, cart, order,
//! auth and image endpoints, the client-side rules the storefront applies
//! (filter serialization, cart pricing, stale-response handling), session
//! persistence, and a Ratatui front end over all of it.

pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod pricing;
pub mod resource;
pub mod session;
pub mod tui;

pub use error::{GemshopError, Result};
