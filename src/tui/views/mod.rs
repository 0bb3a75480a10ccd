//! One module per storefront view.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod orders;
pub mod product;
